//! Application window and event loop management.

mod input;
mod render;

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use eitview_core::{EitViewError, Result, Vec2};
use eitview_render::{save_png, RenderEngine, RenderSink};

use crate::channel::{FrameSender, UserEvent};
use crate::datalogger::DataLogger;
use crate::viewer::Viewer;

/// Minimum interval between window title refreshes.
const TITLE_REFRESH: Duration = Duration::from_millis(250);

/// A producer run on its own thread once the event loop exists.
pub(crate) type Producer = Box<dyn FnOnce(FrameSender) + Send + 'static>;

/// The eitview application state.
pub struct App {
    window: Option<Arc<Window>>,
    engine: Option<RenderEngine>,
    viewer: Viewer,
    logger: DataLogger,
    close_requested: bool,
    cursor: Vec2,
    left_mouse_down: bool,
    next_tick: Option<Instant>,
    last_title_update: Option<Instant>,
}

impl App {
    /// Creates an application around an initialized viewer.
    pub fn new(viewer: Viewer) -> Self {
        Self {
            window: None,
            engine: None,
            viewer,
            logger: DataLogger::new(),
            close_requested: false,
            cursor: Vec2::ZERO,
            left_mouse_down: false,
            next_tick: None,
            last_title_update: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Runs due playback ticks and schedules the next wake-up.
    fn schedule(&mut self, event_loop: &ActiveEventLoop) {
        if !self.viewer.is_animating() {
            self.next_tick = None;
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        let period = self.viewer.tick_period();
        let now = Instant::now();
        let due = *self.next_tick.get_or_insert(now);
        if now >= due {
            self.viewer.tick();
            // Late ticks are dropped rather than replayed in a burst.
            self.next_tick = Some((due + period).max(now));
        }

        if self.viewer.is_animating() {
            if let Some(next) = self.next_tick {
                event_loop.set_control_flow(ControlFlow::WaitUntil(next));
            }
        } else {
            self.next_tick = None;
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }

    fn handle_user_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::Frames {
                frames,
                elapsed_seconds,
            } => {
                // Only buffers the viewer accepts are logged.
                let logged = self.logger.is_running().then(|| frames.clone());
                match self.viewer.load_frame(frames, elapsed_seconds) {
                    Ok(_) => {
                        if let Some(frames) = logged {
                            self.logger.record(&frames);
                        }
                        self.next_tick = None;
                    }
                    Err(e) => log::warn!("dropped frame buffer: {e}"),
                }
            }
            UserEvent::Finished => log::info!("frame producer finished"),
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Escape => self.close_requested = true,
            KeyCode::KeyR => self.viewer.reset_view(),
            KeyCode::KeyL => {
                self.logger.toggle();
            }
            KeyCode::KeyC => self.logger.reset(),
            KeyCode::KeyS => {
                if let Err(e) = self.save_log() {
                    log::error!("failed to save data log: {e}");
                }
            }
            KeyCode::KeyP => {
                if let Err(e) = self.save_image() {
                    log::error!("failed to save image: {e}");
                }
            }
            _ => {}
        }
    }

    /// Saves the data log and the mesh under a timestamped name.
    fn save_log(&self) -> Result<()> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = format!("eitview_{timestamp}.log");
        self.logger.save(&path)?;
        if let Some(mesh) = self.viewer.mesh() {
            DataLogger::save_mesh(&path, mesh)?;
        }
        Ok(())
    }

    /// Captures the current view into a timestamped PNG.
    fn save_image(&mut self) -> Result<()> {
        let Some(engine) = &mut self.engine else {
            return Ok(());
        };
        let Some(frame) = self.viewer.frame(engine.aspect_ratio()) else {
            return Ok(());
        };
        let image = engine.capture(&frame)?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        save_png(format!("eitview_{timestamp}.png"), &image)?;
        Ok(())
    }
}

/// Runs the event loop until the window is closed.
pub(crate) fn run_app(viewer: Viewer, producer: Option<Producer>) -> Result<()> {
    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .map_err(|e| EitViewError::RenderError(format!("failed to create event loop: {e}")))?;

    let producer_thread = producer.map(|producer| {
        let sender = FrameSender::new(event_loop.create_proxy());
        std::thread::spawn(move || producer(sender))
    });

    let mut app = App::new(viewer);
    event_loop
        .run_app(&mut app)
        .map_err(|e| EitViewError::RenderError(format!("event loop error: {e}")))?;

    // The producer sees failed sends once the loop is gone.
    if let Some(handle) = producer_thread {
        if handle.join().is_err() {
            log::warn!("frame producer panicked");
        }
    }
    Ok(())
}
