use crate::coords::PixelSize;

use super::SurfaceErrorAction;

/// Picks the swapchain format: an sRGB 8-bit format when asked for and
/// available, otherwise whatever the surface lists first.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    const SRGB: [wgpu::TextureFormat; 2] = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];

    let preferred = prefer_srgb
        .then(|| SRGB.into_iter().find(|f| caps.formats.contains(f)))
        .flatten();

    preferred.or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    if let Some(mode) = requested {
        if caps.alpha_modes.contains(&mode) {
            return mode;
        }
        log::debug!("alpha mode {mode:?} unsupported by surface; falling back");
    }

    caps.alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Records `new_size` and reconfigures the swapchain.
///
/// wgpu rejects 0x0 configurations (minimized windows); those only update the
/// recorded size and configuration is deferred to the next non-empty resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface<'_>,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PixelSize,
    new_size: PixelSize,
) {
    *size = new_size;
    if new_size.is_empty() {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface<'_>,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PixelSize,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            log::debug!("surface {err:?}; reconfiguring");
            if !size.is_empty() {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
