//! An output surface that draws nowhere and remembers what it was asked to do.

use fenestra_core::*;

/// What a [`HeadlessSurface`] has been asked to do so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceLog {
    pub viewport: Viewport,
    /// Program "compiled" by `initialize`.
    pub program: Option<String>,
    pub textures: u32,
    pub uploads: usize,
    pub frames: usize,
    /// Draw lists of the last composite, bottom first.
    pub last_frame: Vec<DrawList>,
    pub disposed: u32,
}

/// Setup step a headless surface should fail at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadlessFailure {
    NoContext,
    Shader(ShaderStage),
}

pub struct HeadlessSurface {
    info: SurfaceInfo,
    failure: Option<HeadlessFailure>,
    slots: Vec<DrawList>,
    log: SurfaceLog,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32, dpr: f32) -> Self {
        Self {
            info: SurfaceInfo {
                viewport: Viewport::new(width, height),
                dpr,
            },
            failure: None,
            slots: Vec::new(),
            log: SurfaceLog::default(),
        }
    }

    pub fn failing(mut self, failure: HeadlessFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn log(&self) -> &SurfaceLog {
        &self.log
    }
}

impl OutputSurface for HeadlessSurface {
    fn build(&mut self) -> Result<SurfaceInfo> {
        if self.failure == Some(HeadlessFailure::NoContext) {
            return Err(Error::SurfaceUnavailable("headless context disabled".into()));
        }
        self.log.viewport = self.info.viewport;
        Ok(self.info)
    }

    fn initialize<'a>(&'a mut self, shader_path: &'a str) -> LocalBoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if let Some(HeadlessFailure::Shader(stage)) = self.failure {
                return Err(Error::ShaderCompilation {
                    stage,
                    log: format!("{shader_path}composite.{stage}: forced failure"),
                });
            }
            self.log.program = Some(format!("{shader_path}composite"));
            Ok(())
        })
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.log.viewport = viewport;
    }

    fn create_texture(&mut self) -> Result<TextureSlot> {
        let slot = TextureSlot(self.slots.len() as u32);
        self.slots.push(DrawList::default());
        self.log.textures += 1;
        Ok(slot)
    }

    fn upload(&mut self, slot: TextureSlot, content: &DrawList) {
        if let Some(target) = self.slots.get_mut(slot.0 as usize) {
            target.clone_from(content);
            self.log.uploads += 1;
        } else {
            log::warn!("upload to unknown texture slot {}", slot.0);
        }
    }

    fn composite(&mut self, slots: &[TextureSlot]) {
        self.log.last_frame = slots
            .iter()
            .filter_map(|s| self.slots.get(s.0 as usize).cloned())
            .collect();
        self.log.frames += 1;
    }

    fn dispose(&mut self) {
        self.slots.clear();
        self.log.disposed += 1;
    }
}
