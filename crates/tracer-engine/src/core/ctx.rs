use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;

/// Per-window handles passed to `core::App` callbacks.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Asks the platform to resize the window's inner area.
    ///
    /// Returns the new size when the platform applied it immediately; in that
    /// case no `Resized` event may follow. Otherwise the size arrives later
    /// through `on_resize`, or never if the platform refuses it.
    pub fn request_size(&self, size: PixelSize) -> Option<PixelSize> {
        let requested: PhysicalSize<u32> = size.into();
        let applied = self.window.request_inner_size(requested)?;
        log::debug!("window resized immediately to {}x{}", applied.width, applied.height);
        Some(applied.into())
    }
}
