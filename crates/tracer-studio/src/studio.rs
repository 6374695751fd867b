use std::sync::Arc;

use winit::window::Window;

use tracer_engine::coords::{ColorRgba, PixelSize};
use tracer_engine::core::{App, AppControl, WindowCtx};
use tracer_engine::device::GpuInit;
use tracer_engine::input::{InputEvent, Key, MouseButton, MouseButtonState, PointerButtonEvent};
use tracer_engine::render::{WgpuContext, WindowSurface};
use tracer_engine::scene::{PointScene, SceneConfig};
use tracer_engine::space::{Glob, GlobSpace, SpaceGeometry, SpaceId, SpaceMapper};
use tracer_engine::store::PointStore;

use crate::config::{zoom_scale, StudioConfig};

/// Space globs are stored and rendered in.
const CANVAS_SPACE: SpaceId = SpaceId(0);
/// Physical window pixels, where clicks arrive.
const POINTER_SPACE: SpaceId = SpaceId(1);

type Store = PointStore<WgpuContext, GlobSpace>;

/// The tracing canvas: clicks place globs, digits pick swatches, `+`/`-` zoom.
pub struct Studio {
    config: StudioConfig,
    store: Option<Store>,
    color: ColorRgba,
    zoom_level: i32,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            color: config.initial_color,
            config,
            store: None,
            zoom_level: 0,
        }
    }

    fn place_glob(store: &mut Store, x: f32, y: f32, color: ColorRgba) {
        match store.add_glob(Glob::new(x, y, POINTER_SPACE, color)) {
            Ok(()) => log::debug!("{} globs on canvas", store.len()),
            Err(err) => log::error!("could not place glob at ({x}, {y}): {err}"),
        }
    }

    fn zoom_by(&mut self, ctx: &WindowCtx<'_>, increment: i32) {
        let Some(store) = self.store.as_mut() else { return };

        let level = self.zoom_level + increment;
        let scale = zoom_scale(level);
        if let Err(err) = store.set_scale(scale) {
            log::error!("zoom level {level} (scale {scale}) rejected: {err}");
            return;
        }
        self.zoom_level = level;

        // Drawn from the next redraw, once the window has the new size.
        if let Some(applied) = ctx.request_size(store.space().pixel_size()) {
            follow_window(store, applied);
        }
        ctx.request_redraw();
    }

    fn pick_swatch(&mut self, digit: u8) {
        match self.config.swatch(digit) {
            Some(color) => {
                self.color = color;
                log::info!("swatch {digit} selected: {:?}", color.to_array());
            }
            None => log::debug!("no swatch bound to {digit}"),
        }
    }
}

impl App for Studio {
    fn on_window_created(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let canvas = self.config.canvas_size();
        let window_size = PixelSize::from(window.inner_size());

        let mut space = GlobSpace::new(
            CANVAS_SPACE,
            self.config.glob_size,
            canvas.width as f32,
            canvas.height as f32,
        );
        space.register(pointer_space(window_size));

        let mut store = PointStore::new(PointScene::with_config(SceneConfig::default()), space);
        store.init(WindowSurface::new(window, GpuInit::default()))?;

        log::info!(
            "canvas {}x{} ({}x{} globs of {})",
            canvas.width,
            canvas.height,
            self.config.canvas_globs.0,
            self.config.canvas_globs.1,
            self.config.glob_size
        );
        self.store = Some(store);
        Ok(())
    }

    fn on_input(&mut self, ctx: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x,
                y,
            }) => {
                if let Some(store) = self.store.as_mut() {
                    Self::place_glob(store, *x, *y, self.color);
                }
            }

            ev if ev.is_key_press(Key::Escape) => return AppControl::Exit,
            ev if ev.is_key_press(Key::Plus) => self.zoom_by(ctx, 1),
            ev if ev.is_key_press(Key::Minus) => self.zoom_by(ctx, -1),

            InputEvent::Key { key, .. } if event.is_key_press(*key) => {
                if let Some(digit) = key.digit() {
                    self.pick_swatch(digit);
                }
            }

            _ => {}
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, _ctx: &WindowCtx<'_>, size: PixelSize) -> AppControl {
        let Some(store) = self.store.as_mut() else {
            return AppControl::Continue;
        };

        follow_window(store, size);
        AppControl::Continue
    }

    fn on_redraw(&mut self, _ctx: &WindowCtx<'_>) -> AppControl {
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.draw() {
                log::error!("redraw failed: {err}");
            }
        }
        AppControl::Continue
    }
}

/// Re-registers the pointer space and resizes the surface to the window.
fn follow_window(store: &mut PointStore<WgpuContext, GlobSpace>, size: PixelSize) {
    store.space_mut().register(pointer_space(size));
    if let Err(err) = store.resize_surface(size) {
        log::error!("surface resize to {}x{} failed: {err}", size.width, size.height);
    }
}

fn pointer_space(window: PixelSize) -> SpaceGeometry {
    SpaceGeometry::new(POINTER_SPACE, window.width as f32, window.height as f32)
}
