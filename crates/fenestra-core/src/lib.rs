//! # Fenestra core
//!
//! Fenestra renders a retained, pixel-art style GUI at an integer multiple of
//! a fixed base resolution (320x240 by default). This crate holds everything
//! that does not touch a window or a graphics API:
//!
//! - geometry, the nine-way [`Alignment`] and the [`Placement`] formulas;
//! - the [`ComponentTree`] arena with its layout pass;
//! - pointer listener tables and the hover/press passes ([`EventRegistry`]);
//! - the integer scale computation ([`ScaleState`]);
//! - the [`Renderer`] and [`OutputSurface`] seams the platform layer drives.
//!
//! ## Mounting and dispatch
//!
//! ```rust
//! use fenestra_core::*;
//!
//! let mut ui = UiContext::new();
//! let layer = ui
//!     .mount(None, Element::new(NodeKind::Layer, Placement::default()))
//!     .unwrap();
//! let button = Element::new(NodeKind::Group, Placement::default())
//!     .margin(Vec2::new(10.0, 10.0))
//!     .size(Vec2::new(20.0, 20.0))
//!     .on_mouse_enter(|cx| cx.request_redraw());
//! ui.mount(Some(layer), button).unwrap();
//! ui.tree
//!     .compute_layout(layer, Vec2::ZERO, Vec2::new(320.0, 240.0))
//!     .unwrap();
//!
//! assert_eq!(ui.dispatch_pointer_move(Vec2::new(15.0, 15.0)), 1);
//! assert_eq!(ui.take_commands().len(), 1);
//! ```
//!
//! Callbacks only get their own node and a command queue. Anything that
//! changes the structure of the GUI (pushing a layer, rebuilding) is queued
//! as a [`Command`] and applied by the GUI renderer after the pass.

pub mod align;
pub mod clock;
pub mod color;
pub mod component;
pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod layer;
pub mod render_api;
pub mod scale;
pub mod tests;
pub mod texture;
pub mod tree;
pub mod ui;

pub use align::*;
pub use clock::*;
pub use color::*;
pub use component::*;
pub use element::*;
pub use error::*;
pub use events::*;
pub use geometry::*;
pub use input::*;
pub use layer::*;
pub use render_api::*;
pub use scale::*;
pub use texture::*;
pub use tree::*;
pub use ui::*;

/// Base resolution the integer scale is computed against.
pub const BASE_WIDTH: u32 = 320;
pub const BASE_HEIGHT: u32 = 240;
