//! Scripted headless session: a main menu whose button opens an options
//! layer, driven by synthetic pointer and resize events.
//!
//! Pass a JSON config path as the first argument to override the defaults.

use std::cell::Cell;
use std::rc::Rc;

use fenestra_core::*;
use fenestra_platform::{HeadlessSurface, Instance, InstanceConfig};
use fenestra_ui::{ClearRenderer, GuiRenderer, Image, ImageButton};

const WIDGETS: &str = "gui/widgets.png";
const ORANGE: &str = "orange.png";

/// Stands in for an image decoder: knows the size of every bundled texture.
struct Bundled;

impl TextureLoader for Bundled {
    fn load(&self, path: &str) -> LocalBoxFuture<'_, Result<TextureImage>> {
        let size = [(WIDGETS, (256, 256)), (ORANGE, (200, 150))]
            .into_iter()
            .find(|(name, _)| path.ends_with(name))
            .map(|(_, size)| size);
        let path = path.to_string();
        Box::pin(async move {
            let (width, height) = size.ok_or_else(|| Error::AssetLoad {
                path,
                reason: "not bundled".into(),
            })?;
            Ok(TextureImage { width, height })
        })
    }
}

/// Swaps the button sprite between its idle and hovered rows.
fn hover_row(y: f32) -> impl Fn(&mut EventCx<'_>) + 'static {
    move |cx| {
        if let Some(uv) = cx.uv() {
            cx.set_uv(Vec2::new(uv.x, y));
            cx.request_redraw();
        }
    }
}

struct MainMenu;

impl Layer for MainMenu {
    fn name(&self) -> &str {
        "main menu"
    }

    fn build(&mut self, cx: &BuildCx<'_>) -> Result<Vec<Element>> {
        let widgets = cx.textures.get(WIDGETS)?;
        Ok(vec![
            ImageButton(widgets, Vec2::new(0.0, 66.0))
                .align(Alignment::Center)
                .size(Vec2::new(20.0, 20.0))
                .on_mouse_enter(hover_row(86.0))
                .on_mouse_leave(hover_row(66.0))
                .on_mouse_down(|cx| cx.push_layer(OptionsLayer)),
        ])
    }
}

struct OptionsLayer;

impl Layer for OptionsLayer {
    fn name(&self) -> &str {
        "options"
    }

    fn build(&mut self, cx: &BuildCx<'_>) -> Result<Vec<Element>> {
        let widgets = cx.textures.get(WIDGETS)?;
        let orange = cx.textures.get(ORANGE)?;

        // lives as long as this build of the layer
        let counter = Rc::new(Cell::new(0u32));
        log::debug!("built options layer in a {}x{} frame", cx.frame.x, cx.frame.y);

        Ok(vec![
            ImageButton(widgets, Vec2::new(0.0, 106.0))
                .align(Alignment::CenterTop)
                .margin(Vec2::new(-12.0, 30.0))
                .size(Vec2::new(20.0, 20.0))
                .on_mouse_enter(hover_row(126.0))
                .on_mouse_leave(hover_row(106.0))
                .on_mouse_down(move |_| {
                    counter.set(counter.get() + 1);
                    log::info!("counter = {}", counter.get());
                }),
            ImageButton(widgets, Vec2::new(0.0, 146.0))
                .align(Alignment::CenterTop)
                .margin(Vec2::new(12.0, 30.0))
                .size(Vec2::new(20.0, 20.0))
                .on_mouse_enter(hover_row(166.0))
                .on_mouse_leave(hover_row(146.0))
                .on_mouse_down(|cx| cx.pop_layer()),
            Image(orange, Vec2::ZERO)
                .align(Alignment::Center)
                .size(Vec2::new(200.0, 150.0)),
        ])
    }
}

fn report(step: &str, instance: &Instance<HeadlessSurface>) {
    let log = instance.surface().log();
    let quads: usize = log.last_frame.iter().map(|l| l.len()).sum();
    log::info!(
        "{step}: frame {} at {}x{} scale {}, {} quads in {} slots",
        log.frames,
        log.viewport.width,
        log.viewport.height,
        instance.scale().current,
        quads,
        log.last_frame.len()
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => InstanceConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => InstanceConfig::default(),
    };

    let gui = GuiRenderer::new("gui")
        .with_textures(Rc::new(Bundled), config.texture_path.clone(), [WIDGETS, ORANGE])
        .with_layer(MainMenu);
    let scene = ClearRenderer::new("scene", Color::from_hex("#221628"));
    let renderers: Vec<Box<dyn Renderer>> = vec![Box::new(scene), Box::new(gui)];

    let debounce = config.resize_debounce();
    let mut instance = Instance::new(config, HeadlessSurface::new(1280, 960, 1.0));
    pollster::block_on(instance.start(renderers))?;
    let handle = instance.start_loop();

    instance.frame()?;
    report("startup", &instance);

    // Positions are device pixels; at scale 2 the 640x480 logical frame
    // covers the whole surface.
    let script = [
        ("hover main button", HostEvent::PointerMoved { x: 640.0, y: 480.0 }),
        ("open options", HostEvent::PointerDown),
        ("hover counter", HostEvent::PointerMoved { x: 616.0, y: 80.0 }),
        ("count", HostEvent::PointerDown),
        ("count", HostEvent::PointerDown),
        ("hover back", HostEvent::PointerMoved { x: 664.0, y: 80.0 }),
        ("close options", HostEvent::PointerDown),
    ];
    for (step, event) in script {
        let fired = instance.handle_event(event);
        log::debug!("{step}: {fired} callbacks");
        instance.frame()?;
        report(step, &instance);
    }

    // The first resize only reports the initial size and is dropped.
    for (w, h) in [(1280, 960), (1600, 1000), (1920, 1080)] {
        instance.handle_event(HostEvent::Resized(ResizeObservation::DevicePixels {
            width: w,
            height: h,
            dpr: 1.0,
        }));
    }
    std::thread::sleep(debounce);
    instance.frame()?;
    report("resized", &instance);

    handle.stop();
    if !instance.frame()? {
        log::info!("frame loop stopped");
    }
    log::info!("dispose: {:?}", instance.dispose());
    Ok(())
}
