use fenestra_core::*;

/// Scene renderer that only fills its target with a solid colour.
pub struct ClearRenderer {
    name: String,
    color: Color,
    enabled: bool,
    viewport: Viewport,
    output: DrawList,
}

impl ClearRenderer {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            enabled: true,
            viewport: Viewport::default(),
            output: DrawList::default(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Renderer for ClearRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn init(&mut self) -> LocalBoxFuture<'_, Result<()>> {
        Box::pin(async { Ok(()) })
    }

    fn resize(&mut self, viewport: Viewport, _cx: &mut FrameContext<'_>) -> Result<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn render(&mut self, _cx: &mut FrameContext<'_>) -> Result<()> {
        self.output.clear = Some(self.color);
        Ok(())
    }

    fn dispose(&mut self) {
        self.output.clear();
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
