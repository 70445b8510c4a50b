//! Desktop runner on top of winit.
//!
//! The window and its event loop come from winit; the graphics side is
//! whatever [`OutputSurface`] `make_surface` builds for the window.

use std::sync::Arc;

use fenestra_core::*;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::{Instance, InstanceConfig};

struct App<S: OutputSurface, F> {
    config: InstanceConfig,
    make_surface: Option<F>,
    renderers: Option<Vec<Box<dyn Renderer>>>,
    window: Option<Arc<Window>>,
    instance: Option<Instance<S>>,
}

impl<S, F> App<S, F>
where
    S: OutputSurface,
    F: FnOnce(Arc<Window>) -> S,
{
    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn shutdown(&mut self, el: &ActiveEventLoop) {
        if let Some(instance) = &mut self.instance {
            instance.dispose();
        }
        el.exit();
    }
}

impl<S, F> ApplicationHandler<()> for App<S, F>
where
    S: OutputSurface,
    F: FnOnce(Arc<Window>) -> S,
{
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(make_surface) = self.make_surface.take() else {
            return;
        };

        let scale = self.config.desired_scale.max(1);
        let attrs = WindowAttributes::default()
            .with_title("Fenestra")
            .with_inner_size(PhysicalSize::new(
                self.config.default_width * scale,
                self.config.default_height * scale,
            ));
        let window = match el.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e:?}");
                el.exit();
                return;
            }
        };

        let mut instance = Instance::new(self.config.clone(), make_surface(window.clone()));
        let renderers = self.renderers.take().unwrap_or_default();
        if let Err(e) = pollster::block_on(instance.start(renderers)) {
            log::error!("Failed to start instance: {e}");
            el.exit();
            return;
        }
        instance.start_loop();

        self.window = Some(window);
        self.instance = Some(instance);
        self.request_redraw();
    }

    fn window_event(&mut self, el: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let dpr = self
            .window
            .as_ref()
            .map_or(1.0, |w| w.scale_factor() as f32);
        let Some(instance) = &mut self.instance else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                self.shutdown(el);
            }
            WindowEvent::Resized(size) => {
                instance.handle_event(HostEvent::Resized(ResizeObservation::DevicePixels {
                    width: size.width,
                    height: size.height,
                    dpr,
                }));
            }
            WindowEvent::CursorMoved { position, .. } => {
                instance.handle_event(HostEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                instance.handle_event(HostEvent::PointerDown);
            }
            WindowEvent::RedrawRequested => match instance.frame() {
                Ok(true) => self.request_redraw(),
                Ok(false) => {
                    log::info!("Frame loop stopped");
                    self.shutdown(el);
                }
                Err(e) => {
                    log::error!("Frame failed: {e}");
                    self.shutdown(el);
                }
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, el: &ActiveEventLoop) {
        let Some(instance) = &mut self.instance else {
            return;
        };
        match instance.tick() {
            Ok(Some(deadline)) => el.set_control_flow(ControlFlow::WaitUntil(deadline)),
            Ok(None) => el.set_control_flow(ControlFlow::Wait),
            Err(e) => log::error!("Resize failed: {e}"),
        }
    }
}

/// Opens a window and runs `renderers` in it until the window closes or the
/// frame loop is stopped.
pub fn run_desktop<S, F>(
    config: InstanceConfig,
    make_surface: F,
    renderers: Vec<Box<dyn Renderer>>,
) -> anyhow::Result<()>
where
    S: OutputSurface + 'static,
    F: FnOnce(Arc<Window>) -> S + 'static,
{
    let event_loop = EventLoop::new()?;
    let mut app = App {
        config,
        make_surface: Some(make_surface),
        renderers: Some(renderers),
        window: None,
        instance: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
