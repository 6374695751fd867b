use std::sync::Arc;

use anyhow::Context;
use winit::window::Window;

use crate::coords::PixelSize;
use crate::device::{Gpu, GpuInit};
use crate::scene::RenderSurface;

use super::WgpuContext;

/// A winit window as a scene surface.
pub struct WindowSurface {
    window: Arc<Window>,
    init: GpuInit,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>, init: GpuInit) -> Self {
        Self { window, init }
    }
}

impl RenderSurface for WindowSurface {
    type Context = WgpuContext;

    fn pixel_size(&self) -> PixelSize {
        self.window.inner_size().into()
    }

    fn acquire_context(self) -> anyhow::Result<WgpuContext> {
        let gpu = pollster::block_on(Gpu::new(self.window, self.init))
            .context("GPU initialization failed for window")?;
        Ok(WgpuContext::new(gpu))
    }
}
