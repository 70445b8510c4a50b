//! The orchestrator: owns the output surface, the renderers and the mounted
//! GUI, and turns host notifications into resizes, pointer passes and frames.

use fenestra_core::*;
use web_time::Instant;

use crate::{InstanceConfig, LoopHandle, ResizeController};

/// Outcome of [`Instance::dispose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisposeStatus {
    Disposed,
    AlreadyDisposed,
    /// `build` never ran, so there was nothing to release.
    NotBuilt,
}

pub struct Instance<S: OutputSurface> {
    config: InstanceConfig,
    clock: Box<dyn Clock>,
    surface: S,
    renderers: Vec<Box<dyn Renderer>>,
    slots: Vec<TextureSlot>,
    ui: UiContext,
    viewport: Viewport,
    scale: ScaleState,
    pointer: Option<Vec2>,
    resize: ResizeController,
    frame_loop: Option<LoopHandle>,
    built: bool,
    disposed: bool,
}

impl<S: OutputSurface> Instance<S> {
    pub fn new(config: InstanceConfig, surface: S) -> Self {
        Self::with_clock(config, surface, SystemClock)
    }

    pub fn with_clock(config: InstanceConfig, surface: S, clock: impl Clock + 'static) -> Self {
        Self {
            resize: ResizeController::new(config.resize_debounce()),
            scale: ScaleState::new(config.desired_scale),
            config,
            clock: Box::new(clock),
            surface,
            renderers: Vec::new(),
            slots: Vec::new(),
            ui: UiContext::new(),
            viewport: Viewport::new(1, 1),
            pointer: None,
            frame_loop: None,
            built: false,
            disposed: false,
        }
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    /// Last pointer position, in logical pixels.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiContext {
        &mut self.ui
    }

    pub fn renderers(&self) -> impl Iterator<Item = &dyn Renderer> {
        self.renderers.iter().map(|r| r.as_ref())
    }

    pub fn renderer_mut(&mut self, index: usize) -> Option<&mut (dyn Renderer + 'static)> {
        self.renderers.get_mut(index).map(|r| r.as_mut())
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Creates the output surface and records its initial viewport.
    pub fn build(&mut self) -> Result<()> {
        if self.built {
            log::warn!("instance already built");
            return Ok(());
        }
        let info = self.surface.build()?;
        self.viewport = Self::checked_viewport(info.viewport);
        self.scale.recompute(
            self.viewport,
            self.config.default_width,
            self.config.default_height,
            info.dpr,
        );
        self.built = true;
        log::info!(
            "built {}x{} @ dpr {} (scale {}/{})",
            self.viewport.width,
            self.viewport.height,
            self.scale.dpr,
            self.scale.current,
            self.scale.max
        );
        Ok(())
    }

    /// Compiles the compositing program.
    pub async fn initialize(&mut self) -> Result<()> {
        self.surface.initialize(&self.config.shader_path).await
    }

    /// Builds, initializes and registers each renderer in order, giving each
    /// one a texture slot on the output surface.
    pub async fn setup_renderers(&mut self, renderers: Vec<Box<dyn Renderer>>) -> Result<()> {
        for mut renderer in renderers {
            renderer.build(self.viewport)?;
            let init = renderer.init().await;
            if let Err(e) = init {
                renderer.dispose();
                return Err(e);
            }
            let slot = match self.surface.create_texture() {
                Ok(slot) => slot,
                Err(e) => {
                    renderer.dispose();
                    return Err(e);
                }
            };
            let mut cx = FrameContext {
                ui: &mut self.ui,
                viewport: self.viewport,
                scale: self.scale,
            };
            if let Err(e) = renderer.resize(self.viewport, &mut cx) {
                renderer.dispose();
                return Err(e);
            }
            log::info!("renderer '{}' ready in slot {}", renderer.name(), slot.0);
            self.renderers.push(renderer);
            self.slots.push(slot);
        }
        Ok(())
    }

    async fn try_start(&mut self, renderers: Vec<Box<dyn Renderer>>) -> Result<()> {
        self.build()?;
        self.initialize().await?;
        self.setup_renderers(renderers).await
    }

    /// `build`, `initialize` and `setup_renderers`. On failure everything
    /// acquired so far is disposed before the error is returned.
    pub async fn start(&mut self, renderers: Vec<Box<dyn Renderer>>) -> Result<()> {
        let started = self.try_start(renderers).await;
        if let Err(e) = started {
            log::error!("startup failed: {e}");
            self.dispose();
            return Err(e);
        }
        Ok(())
    }

    fn checked_viewport(viewport: Viewport) -> Viewport {
        if viewport.is_degenerate() {
            log::warn!(
                "clamping degenerate viewport {}x{} to at least 1x1",
                viewport.width,
                viewport.height
            );
        }
        viewport.clamped()
    }

    /// Resize with a size in logical pixels.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) -> Result<()> {
        self.apply_resize(ResizeObservation::Logical { width, height, dpr })
    }

    /// Applies a resize right away, bypassing the debouncer.
    pub fn apply_resize(&mut self, observation: ResizeObservation) -> Result<()> {
        let (viewport, dpr) = observation.normalize();
        self.propagate(Self::checked_viewport(viewport), dpr)
    }

    fn propagate(&mut self, viewport: Viewport, dpr: f32) -> Result<()> {
        self.viewport = viewport;
        self.scale.recompute(
            viewport,
            self.config.default_width,
            self.config.default_height,
            dpr,
        );
        log::debug!(
            "resize to {}x{} @ dpr {}: scale {} (max {})",
            viewport.width,
            viewport.height,
            self.scale.dpr,
            self.scale.current,
            self.scale.max
        );
        if !self.built || self.disposed {
            return Ok(());
        }

        self.surface.set_viewport(viewport);
        let mut cx = FrameContext {
            ui: &mut self.ui,
            viewport,
            scale: self.scale,
        };
        for renderer in &mut self.renderers {
            renderer.resize(viewport, &mut cx)?;
        }
        Ok(())
    }

    /// Changes the preferred scale and re-runs the scale computation against
    /// the current viewport.
    pub fn set_desired_scale(&mut self, desired: u32) -> Result<()> {
        self.scale.desired = desired;
        self.propagate(self.viewport, self.scale.dpr)
    }

    /// Feeds one host notification in. Returns the number of pointer
    /// callbacks that ran.
    pub fn handle_event(&mut self, event: HostEvent) -> usize {
        match event {
            HostEvent::Resized(observation) => {
                self.resize.notify(observation, self.clock.now());
                0
            }
            HostEvent::PointerMoved { x, y } => {
                let pointer = self.scale.to_logical(Vec2::new(x, y));
                self.pointer = Some(pointer);
                self.ui.dispatch_pointer_move(pointer)
            }
            HostEvent::PointerDown => match self.pointer {
                Some(pointer) => self.ui.dispatch_pointer_down(pointer),
                None => 0,
            },
        }
    }

    /// Applies a debounced resize whose delay has run out. Returns when the
    /// next pending resize is due, if any.
    pub fn tick(&mut self) -> Result<Option<Instant>> {
        if let Some(observation) = self.resize.poll(self.clock.now()) {
            self.apply_resize(observation)?;
        }
        Ok(self.resize.deadline())
    }

    /// Renders every enabled renderer into its slot and composites them in
    /// registration order.
    pub fn render(&mut self) -> Result<()> {
        if !self.built || self.disposed {
            return Ok(());
        }
        let mut cx = FrameContext {
            ui: &mut self.ui,
            viewport: self.viewport,
            scale: self.scale,
        };
        let mut active = Vec::with_capacity(self.slots.len());
        for (renderer, slot) in self.renderers.iter_mut().zip(&self.slots) {
            if !renderer.is_enabled() {
                continue;
            }
            renderer.render(&mut cx)?;
            self.surface.upload(*slot, renderer.output());
            active.push(*slot);
        }
        self.surface.composite(&active);

        // Nothing enabled this frame consumed them.
        let stale = self.ui.discard_redraws();
        if stale > 0 {
            log::trace!("dropped {stale} redraw requests with no active GUI renderer");
        }
        Ok(())
    }

    /// Starts (or restarts) the frame loop.
    pub fn start_loop(&mut self) -> LoopHandle {
        self.stop_loop();
        let handle = LoopHandle::new();
        self.frame_loop = Some(handle.clone());
        handle
    }

    pub fn stop_loop(&mut self) {
        if let Some(handle) = self.frame_loop.take() {
            handle.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(|h| h.is_running())
    }

    /// One display-synchronized step. Returns `false` once the loop has
    /// been stopped.
    pub fn frame(&mut self) -> Result<bool> {
        if !self.is_running() {
            self.frame_loop = None;
            return Ok(false);
        }
        self.tick()?;
        self.render()?;
        Ok(true)
    }

    /// Releases renderers and the surface. Safe to call any number of times.
    pub fn dispose(&mut self) -> DisposeStatus {
        self.stop_loop();
        self.resize.cancel();
        if !self.built {
            log::info!("dispose called before build, nothing to release");
            return DisposeStatus::NotBuilt;
        }
        if self.disposed {
            return DisposeStatus::AlreadyDisposed;
        }
        self.disposed = true;
        for renderer in &mut self.renderers {
            renderer.dispose();
        }
        self.renderers.clear();
        self.slots.clear();
        self.ui.clear();
        self.pointer = None;
        self.surface.dispose();
        log::info!("instance disposed");
        DisposeStatus::Disposed
    }
}
