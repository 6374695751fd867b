use std::sync::Arc;

use winit::window::Window;

use crate::coords::PixelSize;
use crate::input::InputEvent;

use super::ctx::WindowCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the host.
///
/// Callbacks run on the event-loop thread, one at a time. Nothing is drawn
/// unless the app draws in `on_redraw` or from another callback.
pub trait App {
    /// Called once, right after the window exists. An error ends the run.
    fn on_window_created(&mut self, window: Arc<Window>) -> anyhow::Result<()>;

    /// Called for every translated input event.
    fn on_input(&mut self, ctx: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called when the window's physical size changed. A redraw follows.
    fn on_resize(&mut self, ctx: &WindowCtx<'_>, size: PixelSize) -> AppControl {
        let _ = (ctx, size);
        AppControl::Continue
    }

    /// Called when the window needs repainting.
    fn on_redraw(&mut self, ctx: &WindowCtx<'_>) -> AppControl;
}
