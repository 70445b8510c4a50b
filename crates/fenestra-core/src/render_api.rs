//! The seams between the orchestrator and whatever actually draws.
//!
//! [`Renderer`]s are offscreen sub-surfaces that produce a [`DrawList`] each
//! frame; the [`OutputSurface`] owns the primary surface and composites one
//! texture slot per renderer. Program compilation, texture upload and the
//! graphics API itself all live behind these two traits.

use std::future::Future;
use std::pin::Pin;

use crate::{ComponentId, Color, Matrix3, Result, ScaleState, UiContext, Vec2};

pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Device-pixel size of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// At least 1x1.
    pub fn clamped(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }
}

/// One textured quad: `world` maps the unit quad to the screen rectangle,
/// `uv` maps it into the texture array layer `texture`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub component: Option<ComponentId>,
    pub world: Matrix3,
    pub uv: Matrix3,
    pub texture: u32,
}

/// A renderer's output for one frame, in the order it should be drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub clear: Option<Color>,
    pub quads: Vec<Quad>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.clear = None;
        self.quads.clear();
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.clear.is_none()
    }
}

/// State handed to renderers on resize and render.
pub struct FrameContext<'a> {
    pub ui: &'a mut UiContext,
    pub viewport: Viewport,
    pub scale: ScaleState,
}

impl FrameContext<'_> {
    /// Logical frame the GUI is laid out in.
    pub fn logical_frame(&self) -> Vec2 {
        self.scale.logical_frame(self.viewport)
    }
}

pub trait Renderer {
    fn name(&self) -> &str;

    /// Allocates the renderer's target.
    fn build(&mut self, viewport: Viewport) -> Result<()>;

    /// One-time setup (programs, buffers, assets).
    fn init(&mut self) -> LocalBoxFuture<'_, Result<()>>;

    fn resize(&mut self, viewport: Viewport, cx: &mut FrameContext<'_>) -> Result<()>;

    fn render(&mut self, cx: &mut FrameContext<'_>) -> Result<()>;

    /// Releases the target. Called at most once by the orchestrator.
    fn dispose(&mut self);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn enable(&mut self) {
        self.set_enabled(true);
    }

    fn disable(&mut self) {
        self.set_enabled(false);
    }

    fn output(&self) -> &DrawList;
}

/// Opaque handle to a texture on the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureSlot(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInfo {
    pub viewport: Viewport,
    pub dpr: f32,
}

/// The primary, on-screen surface.
pub trait OutputSurface {
    /// Creates the surface and its context; `Error::SurfaceUnavailable` when
    /// the required capability is missing.
    fn build(&mut self) -> Result<SurfaceInfo>;

    /// Compiles and links the compositing program found under `shader_path`.
    fn initialize<'a>(&'a mut self, shader_path: &'a str) -> LocalBoxFuture<'a, Result<()>>;

    fn set_viewport(&mut self, viewport: Viewport);

    fn create_texture(&mut self) -> Result<TextureSlot>;

    fn upload(&mut self, slot: TextureSlot, content: &DrawList);

    /// Draws the given slots in order and presents.
    fn composite(&mut self, slots: &[TextureSlot]);

    fn dispose(&mut self);
}
