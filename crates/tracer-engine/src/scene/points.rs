use crate::coords::{ColorRgba, PixelSize};

use super::context::{GpuContext, RenderSurface};
use super::program::{point_program, FLOATS_PER_VERTEX};
use super::{Precondition, SceneError};

/// Scene configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneConfig {
    /// Color the surface is cleared to before every draw.
    pub clear_color: ColorRgba,
    /// Points are coplanar (z = 0), so with `LessEqual` depth compare this
    /// keeps paint-over ordering; kept switchable for backends without depth.
    pub depth_test: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: ColorRgba::transparent(),
            depth_test: true,
        }
    }
}

/// Observable lifecycle of a [`PointScene`].
///
/// `Uninitialized → Initialized → Buffered`; there is no way back.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneState {
    Uninitialized,
    Initialized,
    Buffered,
}

enum Stage<C> {
    Uninitialized,
    Ready(Bound<C>),
}

struct Bound<C> {
    ctx: C,
    size: PixelSize,
    /// `None` until the first successful `buffer_points`.
    vertex_count: Option<u32>,
}

/// GPU-facing point renderer.
///
/// Holds one program and one dynamic vertex buffer on a single surface and
/// knows nothing about what the vertices mean. Every upload replaces the whole
/// buffer; every draw renders the whole buffer as a triangle list.
pub struct PointScene<C> {
    config: SceneConfig,
    stage: Stage<C>,
}

impl<C: GpuContext> Default for PointScene<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: GpuContext> PointScene<C> {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            stage: Stage::Uninitialized,
        }
    }

    /// Binds the scene to `surface` and builds the point program.
    ///
    /// Must be called exactly once. On failure the scene stays uninitialized
    /// and the error carries the backend diagnostic.
    pub fn init<S>(&mut self, surface: S) -> Result<(), SceneError>
    where
        S: RenderSurface<Context = C>,
    {
        if matches!(self.stage, Stage::Ready(_)) {
            return Err(SceneError::Precondition(Precondition::AlreadyInitialized));
        }

        let size = surface.pixel_size();
        let mut ctx = surface
            .acquire_context()
            .map_err(|e| SceneError::Initialization(format!("{e:#}")))?;

        let program = point_program(self.config.depth_test);
        ctx.build_program(&program)?;
        log::debug!(
            "program '{}' ready: stride {} floats, {} attributes",
            program.label,
            program.layout.stride,
            program.layout.attributes.len()
        );

        ctx.allocate_vertex_buffer();
        ctx.set_clear_color(self.config.clear_color);
        ctx.set_viewport(size);

        log::info!("point scene initialized at {}x{}", size.width, size.height);

        self.stage = Stage::Ready(Bound {
            ctx,
            size,
            vertex_count: None,
        });
        Ok(())
    }

    /// Replaces the vertex buffer with `data` (6 floats per vertex).
    ///
    /// Returns the new vertex count. Invalid lengths are rejected before
    /// anything reaches the GPU, so previously buffered data stays intact.
    pub fn buffer_points(&mut self, data: &[f32]) -> Result<u32, SceneError> {
        let bound = self.bound_mut()?;
        let count = vertex_count_for(data.len())?;

        bound.ctx.upload_vertices(data);
        bound.vertex_count = Some(count);

        log::trace!("buffered {count} vertices");
        Ok(count)
    }

    /// Draws the current buffer and returns how many vertices were rendered.
    ///
    /// An initialized scene with nothing buffered yet is valid: nothing is
    /// drawn and `Ok(0)` is returned.
    pub fn draw(&mut self) -> Result<u32, SceneError> {
        let bound = self.bound_mut()?;

        let Some(count) = bound.vertex_count else {
            log::warn!("not drawing: no points have been buffered yet");
            return Ok(0);
        };

        bound.ctx.draw_triangles(count)?;
        Ok(count)
    }

    /// Resizes the bound surface and viewport. Does not redraw.
    ///
    /// Each axis is clamped to the device's [`max_dimension`](Self::max_dimension);
    /// the clamped size is what [`size`](Self::size) reports afterwards.
    pub fn resize(&mut self, requested: PixelSize) -> Result<(), SceneError> {
        let bound = self.bound_mut()?;

        let max = bound.ctx.max_dimension();
        let size = PixelSize::new(requested.width.min(max), requested.height.min(max));
        if size != requested {
            log::warn!(
                "surface {}x{} exceeds device limit {max}; clamped to {}x{}",
                requested.width,
                requested.height,
                size.width,
                size.height
            );
        }

        if bound.size == size {
            return Ok(());
        }

        bound.ctx.resize(size);
        bound.ctx.set_viewport(size);
        bound.size = size;

        log::debug!("point scene resized to {}x{}", size.width, size.height);
        Ok(())
    }

    pub fn state(&self) -> SceneState {
        match &self.stage {
            Stage::Uninitialized => SceneState::Uninitialized,
            Stage::Ready(Bound { vertex_count: None, .. }) => SceneState::Initialized,
            Stage::Ready(Bound { vertex_count: Some(_), .. }) => SceneState::Buffered,
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        matches!(self.stage, Stage::Ready(_))
    }

    /// Vertices currently buffered; `None` before the first upload.
    pub fn vertex_count(&self) -> Option<u32> {
        match &self.stage {
            Stage::Ready(bound) => bound.vertex_count,
            Stage::Uninitialized => None,
        }
    }

    /// Surface size the scene is drawing at.
    pub fn size(&self) -> Option<PixelSize> {
        match &self.stage {
            Stage::Ready(bound) => Some(bound.size),
            Stage::Uninitialized => None,
        }
    }

    /// Largest surface width or height the bound device supports.
    pub fn max_dimension(&self) -> Option<u32> {
        match &self.stage {
            Stage::Ready(bound) => Some(bound.ctx.max_dimension()),
            Stage::Uninitialized => None,
        }
    }

    /// Fails with [`SceneError::SurfaceTooLarge`] when `size` cannot be
    /// rendered by the bound device. Always passes before `init`.
    pub fn check_size(&self, size: PixelSize) -> Result<(), SceneError> {
        match self.max_dimension() {
            Some(max) if size.width > max || size.height > max => Err(SceneError::SurfaceTooLarge {
                width: size.width,
                height: size.height,
                max,
            }),
            _ => Ok(()),
        }
    }

    /// The GPU context, once bound.
    pub fn context(&self) -> Option<&C> {
        match &self.stage {
            Stage::Ready(bound) => Some(&bound.ctx),
            Stage::Uninitialized => None,
        }
    }

    fn bound_mut(&mut self) -> Result<&mut Bound<C>, SceneError> {
        match &mut self.stage {
            Stage::Ready(bound) => Ok(bound),
            Stage::Uninitialized => Err(SceneError::Precondition(Precondition::NotInitialized)),
        }
    }
}

/// Vertex count for a flat buffer of `len` floats.
pub fn vertex_count_for(len: usize) -> Result<u32, SceneError> {
    let invalid = SceneError::BufferValidation {
        len,
        stride: FLOATS_PER_VERTEX,
    };
    if len % FLOATS_PER_VERTEX != 0 {
        return Err(invalid);
    }
    u32::try_from(len / FLOATS_PER_VERTEX).map_err(|_| invalid)
}
