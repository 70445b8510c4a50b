//! Declarative component descriptions.
//!
//! Layers return a `Vec<Element>`; mounting turns each element into a node
//! of the [`ComponentTree`](crate::ComponentTree) and registers its handlers.

use std::rc::Rc;

use crate::{Alignment, Callback, EventCx, Placement, TextureHandle, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Image { texture: TextureHandle, uv: Vec2 },
    ImageButton { texture: TextureHandle, uv: Vec2 },
    /// Container with an explicit size.
    Group,
    /// Container that takes its parent's full size.
    Layer,
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Group | NodeKind::Layer)
    }
}

#[derive(Clone, Default)]
pub struct Handlers {
    pub on_mouse_enter: Option<Callback>,
    pub on_mouse_leave: Option<Callback>,
    pub on_mouse_down: Option<Callback>,
}

impl Handlers {
    pub fn is_empty(&self) -> bool {
        self.on_mouse_enter.is_none() && self.on_mouse_leave.is_none() && self.on_mouse_down.is_none()
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cb = |c: &Option<Callback>| if c.is_some() { "<callback>" } else { "-" };
        f.debug_struct("Handlers")
            .field("on_mouse_enter", &cb(&self.on_mouse_enter))
            .field("on_mouse_leave", &cb(&self.on_mouse_leave))
            .field("on_mouse_down", &cb(&self.on_mouse_down))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub kind: NodeKind,
    pub placement: Placement,
    pub handlers: Handlers,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: NodeKind, placement: Placement) -> Self {
        Element {
            kind,
            placement,
            handlers: Handlers::default(),
            children: vec![],
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.placement.alignment = alignment;
        self
    }

    pub fn margin(mut self, margin: Vec2) -> Self {
        self.placement.margin = margin;
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.placement.size = size;
        self
    }

    pub fn with_children(mut self, kids: Vec<Element>) -> Self {
        self.children = kids;
        self
    }

    pub fn on_mouse_enter(mut self, f: impl Fn(&mut EventCx<'_>) + 'static) -> Self {
        self.handlers.on_mouse_enter = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_leave(mut self, f: impl Fn(&mut EventCx<'_>) + 'static) -> Self {
        self.handlers.on_mouse_leave = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_down(mut self, f: impl Fn(&mut EventCx<'_>) + 'static) -> Self {
        self.handlers.on_mouse_down = Some(Rc::new(f));
        self
    }
}
