//! Hand-off of solved frames from a solver thread to the event loop.

use std::time::Instant;

use winit::event_loop::EventLoopProxy;

use eitview_core::FrameBuffer;

/// Events injected into the viewer's event loop.
#[derive(Debug)]
pub enum UserEvent {
    /// A freshly solved frame buffer.
    Frames {
        frames: FrameBuffer,
        elapsed_seconds: f64,
    },
    /// The producer has finished; the window stays open.
    Finished,
}

/// Thread-safe handle for delivering frame buffers to a running viewer.
///
/// Deliveries are queued as user events, so they are applied between ticks
/// and never while a frame is being mapped.
#[derive(Debug, Clone)]
pub struct FrameSender {
    proxy: EventLoopProxy<UserEvent>,
    last_delivery: Option<Instant>,
}

impl FrameSender {
    pub(crate) fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy,
            last_delivery: None,
        }
    }

    /// Delivers a buffer together with the time it took to produce.
    ///
    /// Returns `false` once the event loop has exited.
    pub fn send(&self, frames: FrameBuffer, elapsed_seconds: f64) -> bool {
        self.proxy
            .send_event(UserEvent::Frames {
                frames,
                elapsed_seconds,
            })
            .is_ok()
    }

    /// Delivers a buffer, measuring the elapsed time since the previous
    /// delivery through this handle. The first delivery reports zero, which
    /// shows its first frame without animating.
    pub fn send_timed(&mut self, frames: FrameBuffer) -> bool {
        let now = Instant::now();
        let elapsed = self
            .last_delivery
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_delivery = Some(now);
        self.send(frames, elapsed)
    }

    /// Tells the viewer no more buffers will arrive.
    pub fn finish(&self) -> bool {
        self.proxy.send_event(UserEvent::Finished).is_ok()
    }
}
