//! Anchored placement of a single component.
//!
//! A component is described by an [`Alignment`], a margin and a size. Its
//! absolute position is derived from the parent's frame by
//! [`ComponentState::compute_position`] and is never set by callers directly.

use crate::{Alignment, HAlign, Matrix3, Rect, VAlign, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub alignment: Alignment,
    pub margin: Vec2,
    pub size: Vec2,
}

impl Placement {
    pub fn new(alignment: Alignment, margin: Vec2, size: Vec2) -> Self {
        Self {
            alignment,
            margin,
            size,
        }
    }

    /// Resolves the placement against a parent frame.
    ///
    /// `offset = parent_size - size` is the slack on each axis; left/top add the
    /// margin, center adds half the slack plus the margin, right/bottom add the
    /// slack minus the margin. The result is floored to whole pixels.
    pub fn resolve(&self, origin: Vec2, parent_size: Vec2) -> Vec2 {
        let m = self.margin;
        let o = parent_size - self.size;
        let mut p = origin;

        match self.alignment.horizontal() {
            HAlign::Left => p.x += m.x,
            HAlign::Center => p.x += o.x / 2.0 + m.x,
            HAlign::Right => p.x += o.x - m.x,
        }

        match self.alignment.vertical() {
            VAlign::Top => p.y += m.y,
            VAlign::Center => p.y += o.y / 2.0 + m.y,
            VAlign::Bottom => p.y += o.y - m.y,
        }

        p.floor()
    }
}

/// Per-node state shared by every component variant.
#[derive(Clone, Debug, Default)]
pub struct ComponentState {
    placement: Placement,
    position: Option<Vec2>,
    hovered: bool,
}

impl ComponentState {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            position: None,
            hovered: false,
        }
    }

    pub fn compute_position(&mut self, origin: Vec2, parent_size: Vec2) -> Vec2 {
        let p = self.placement.resolve(origin, parent_size);
        self.position = Some(p);
        p
    }

    /// `None` until the layout pass has run for this node.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn alignment(&self) -> Alignment {
        self.placement.alignment
    }

    pub fn margin(&self) -> Vec2 {
        self.placement.margin
    }

    pub fn set_margin(&mut self, margin: Vec2) {
        self.placement.margin = margin;
    }

    pub fn size(&self) -> Vec2 {
        self.placement.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.placement.size = size;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// `false` while unpositioned.
    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().is_some_and(|r| r.contains(point))
    }

    /// The laid-out rectangle, once a layout pass has run.
    pub fn bounds(&self) -> Option<Rect> {
        self.position
            .map(|origin| Rect::from_origin_size(origin, self.placement.size))
    }

    /// Maps the unit quad onto this component's rectangle.
    pub fn world_matrix(&self) -> Option<Matrix3> {
        self.position
            .map(|p| Matrix3::translation(p).scale(self.placement.size))
    }
}
