use pollster::FutureExt;

use eitview_core::ScrollDirection;

use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, ElementState, LogicalSize, MouseButton,
    MouseScrollDelta, PhysicalKey, RenderEngine, UserEvent, Vec2, Window, WindowEvent, WindowId,
};

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("eitview")
            .with_inner_size(LogicalSize::new(800, 800));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match RenderEngine::new_windowed(window.clone()).block_on() {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => {
                log::error!("failed to create render engine: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        self.handle_user_event(event);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = position;
                if self.left_mouse_down {
                    self.viewer.drag(position);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.left_mouse_down = true;
                    self.viewer.press(self.cursor);
                }
                ElementState::Released => {
                    self.left_mouse_down = false;
                    self.viewer.release();
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                if let Some(direction) = ScrollDirection::from_delta(scroll) {
                    self.viewer.scroll(direction);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let (PhysicalKey::Code(code), ElementState::Pressed) =
                    (event.physical_key, event.state)
                {
                    self.handle_key(code);
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.schedule(event_loop);
        if self.viewer.needs_redraw() {
            self.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.viewer.teardown();
        self.engine = None;
    }
}
