#![allow(non_snake_case)]
//! Widgets, the layer stack and the built-in renderers.

pub mod gui;
pub mod layers;
pub mod scene;

pub use gui::{GuiRenderer, Redraw};
pub use layers::LayerStack;
pub use scene::ClearRenderer;

use fenestra_core::*;

/// A textured quad showing the `size`-sized region of `texture` at `uv`.
/// Size defaults to zero; set it with `.size(..)`.
pub fn Image(texture: TextureHandle, uv: Vec2) -> Element {
    Element::new(NodeKind::Image { texture, uv }, Placement::default())
}

/// An image that is expected to carry pointer handlers.
pub fn ImageButton(texture: TextureHandle, uv: Vec2) -> Element {
    Element::new(NodeKind::ImageButton { texture, uv }, Placement::default())
}

pub fn Group(size: Vec2, children: Vec<Element>) -> Element {
    Element::new(NodeKind::Group, Placement::default())
        .size(size)
        .with_children(children)
}
