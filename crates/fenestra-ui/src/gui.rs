//! The offscreen GUI renderer.
//!
//! The GUI is laid out and drawn in logical pixels: the renderer's target is
//! the logical frame, and the compositor stretches it over the viewport by the
//! current integer scale. Quads are produced for every positioned `Image` and
//! `ImageButton` in layer order.

use std::rc::Rc;

use fenestra_core::*;

use crate::LayerStack;

/// How the last `render` refreshed the draw list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    Skipped,
    /// Only queued components were refreshed.
    Partial(usize),
    /// The whole list was regenerated.
    Full,
}

struct TextureSource {
    loader: Rc<dyn TextureLoader>,
    base: String,
    paths: Vec<String>,
}

pub struct GuiRenderer {
    name: String,
    enabled: bool,
    viewport: Viewport,
    frame: Vec2,
    clear: Color,
    textures: TextureSet,
    source: Option<TextureSource>,
    layers: LayerStack,
    queue: Vec<ComponentId>,
    needs_rebuild: bool,
    needs_full_redraw: bool,
    last_redraw: Redraw,
    output: DrawList,
}

impl GuiRenderer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            viewport: Viewport::default(),
            frame: Vec2::ZERO,
            clear: Color::TRANSPARENT,
            textures: TextureSet::new(),
            source: None,
            layers: LayerStack::new(),
            queue: Vec::new(),
            needs_rebuild: true,
            needs_full_redraw: true,
            last_redraw: Redraw::Skipped,
            output: DrawList::default(),
        }
    }

    /// Textures to load during `init`, in texture-array order.
    pub fn with_textures(
        mut self,
        loader: Rc<dyn TextureLoader>,
        base: impl Into<String>,
        paths: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.source = Some(TextureSource {
            loader,
            base: base.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Layer mounted on the first render.
    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.add(Box::new(layer));
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear = color;
        self
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// Logical frame the layers were last laid out in.
    pub fn frame(&self) -> Vec2 {
        self.frame
    }

    pub fn last_redraw(&self) -> Redraw {
        self.last_redraw
    }

    pub fn push_layer(&mut self, ui: &mut UiContext, layer: impl Layer + 'static) -> Result<()> {
        self.layers.push(ui, &self.textures, self.frame, Box::new(layer))?;
        self.needs_full_redraw = true;
        Ok(())
    }

    pub fn pop_layer(&mut self, ui: &mut UiContext) -> Result<Option<Box<dyn Layer>>> {
        let popped = self.layers.pop(ui)?;
        self.needs_full_redraw = true;
        Ok(popped)
    }

    fn apply_commands(&mut self, ui: &mut UiContext) -> Result<()> {
        for command in ui.take_commands() {
            match command {
                Command::Redraw(id) => {
                    if !self.queue.contains(&id) {
                        self.queue.push(id);
                    }
                }
                Command::PushLayer(layer) => {
                    self.layers.push(ui, &self.textures, self.frame, layer)?;
                    self.needs_full_redraw = true;
                }
                Command::PopLayer => {
                    self.layers.pop(ui)?;
                    self.needs_full_redraw = true;
                }
                Command::RebuildLayers => self.needs_rebuild = true,
                Command::Relayout => {
                    self.layers.compute_tree(ui, self.frame)?;
                    self.needs_full_redraw = true;
                }
            }
        }
        Ok(())
    }

    fn quad_for(id: ComponentId, tree: &ComponentTree) -> Result<Option<Quad>> {
        let node = tree.node(id)?;
        let texture = match node.kind() {
            NodeKind::Image { texture, .. } | NodeKind::ImageButton { texture, .. } => texture.index,
            NodeKind::Group | NodeKind::Layer => return Ok(None),
        };
        let world = match tree.world_matrix(id) {
            Ok(world) => world,
            Err(Error::Unpositioned(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(Quad {
            component: Some(id),
            world,
            uv: node.texture_matrix()?,
            texture,
        }))
    }

    fn redraw_all(&mut self, ui: &UiContext) -> Result<()> {
        self.output.clear();
        self.output.clear = Some(self.clear);
        for root in self.layers.roots() {
            for id in ui.tree.descendants(root) {
                if let Some(quad) = Self::quad_for(id, &ui.tree)? {
                    self.output.quads.push(quad);
                }
            }
        }
        self.queue.clear();
        Ok(())
    }

    fn redraw_queued(&mut self, ui: &UiContext) -> Result<usize> {
        let mut refreshed = 0;
        for id in self.queue.drain(..) {
            if !ui.tree.contains(id) {
                continue;
            }
            let Some(fresh) = Self::quad_for(id, &ui.tree)? else {
                continue;
            };
            if let Some(quad) = self
                .output
                .quads
                .iter_mut()
                .find(|q| q.component == Some(id))
            {
                *quad = fresh;
                refreshed += 1;
            }
        }
        Ok(refreshed)
    }
}

impl Renderer for GuiRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn init(&mut self) -> LocalBoxFuture<'_, Result<()>> {
        Box::pin(async move {
            if let Some(source) = &self.source {
                let loaded = self
                    .textures
                    .load_all(source.loader.as_ref(), &source.base, &source.paths)
                    .await;
                log::info!(
                    "{}: loaded {loaded} of {} textures",
                    self.name,
                    source.paths.len()
                );
            }
            self.needs_rebuild = true;
            Ok(())
        })
    }

    fn resize(&mut self, viewport: Viewport, cx: &mut FrameContext<'_>) -> Result<()> {
        self.viewport = viewport;
        self.frame = cx.logical_frame();
        log::debug!("{}: frame is now {}x{}", self.name, self.frame.x, self.frame.y);
        self.layers.compute_tree(cx.ui, self.frame)?;
        self.needs_full_redraw = true;
        Ok(())
    }

    fn render(&mut self, cx: &mut FrameContext<'_>) -> Result<()> {
        let frame = cx.logical_frame();
        if frame != self.frame {
            self.frame = frame;
            self.layers.compute_tree(cx.ui, frame)?;
            self.needs_full_redraw = true;
        }

        self.apply_commands(cx.ui)?;

        if self.needs_rebuild {
            self.layers.rebuild(cx.ui, &self.textures, self.frame)?;
            self.needs_rebuild = false;
            self.needs_full_redraw = true;
        }

        self.last_redraw = if self.needs_full_redraw {
            self.redraw_all(cx.ui)?;
            self.needs_full_redraw = false;
            Redraw::Full
        } else if !self.queue.is_empty() {
            Redraw::Partial(self.redraw_queued(cx.ui)?)
        } else {
            Redraw::Skipped
        };
        Ok(())
    }

    fn dispose(&mut self) {
        self.layers.detach();
        self.queue.clear();
        self.output.clear();
        log::info!("{}: disposed", self.name);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn output(&self) -> &DrawList {
        &self.output
    }
}
