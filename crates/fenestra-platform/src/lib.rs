//! Platform layer: the `Instance` orchestrator, resize debouncing, the frame
//! loop, a headless output surface and the winit desktop runner.

pub mod config;
pub mod frame_loop;
pub mod headless;
pub mod instance;
pub mod resize;

#[cfg(feature = "desktop")]
pub mod desktop;

pub use config::InstanceConfig;
pub use frame_loop::LoopHandle;
pub use headless::{HeadlessFailure, HeadlessSurface, SurfaceLog};
pub use instance::{DisposeStatus, Instance};
pub use resize::ResizeController;

#[cfg(feature = "desktop")]
pub use desktop::run_desktop;
