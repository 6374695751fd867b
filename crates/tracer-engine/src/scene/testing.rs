//! In-memory GPU context used by scene and store tests.

use crate::coords::{ColorRgba, PixelSize};

use super::context::{GpuContext, ProgramDesc, RenderSurface};
use super::{ProgramError, SceneError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GpuCall {
    BuildProgram { stride: u32, attributes: usize, depth_test: bool },
    AllocateVertexBuffer,
    Upload(Vec<f32>),
    ClearColor(ColorRgba),
    Viewport(PixelSize),
    Resize(PixelSize),
    Draw(u32),
}

/// Records every call and mirrors the buffer the GPU would hold.
#[derive(Debug, Default)]
pub(crate) struct RecordingContext {
    pub calls: Vec<GpuCall>,
    pub buffer: Vec<f32>,
    pub draws: Vec<u32>,
    fail_program: Option<ProgramError>,
    fail_draw: Option<(usize, String)>, // (successful draws allowed, message)
    max_dimension: Option<u32>,
}

/// Matches `wgpu::Limits::default().max_texture_dimension_2d`.
pub(crate) const DEFAULT_MAX_DIMENSION: u32 = 8192;

impl RecordingContext {
    pub fn uploads(&self) -> Vec<&[f32]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GpuCall::Upload(data) => Some(data.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl GpuContext for RecordingContext {
    fn build_program(&mut self, desc: &ProgramDesc<'_>) -> Result<(), ProgramError> {
        if let Some(err) = self.fail_program.take() {
            return Err(err);
        }
        desc.layout
            .validate()
            .map_err(|log| ProgramError::Link { log })?;
        self.calls.push(GpuCall::BuildProgram {
            stride: desc.layout.stride,
            attributes: desc.layout.attributes.len(),
            depth_test: desc.depth_test,
        });
        Ok(())
    }

    fn allocate_vertex_buffer(&mut self) {
        self.calls.push(GpuCall::AllocateVertexBuffer);
    }

    fn upload_vertices(&mut self, data: &[f32]) {
        self.buffer = data.to_vec();
        self.calls.push(GpuCall::Upload(data.to_vec()));
    }

    fn set_clear_color(&mut self, color: ColorRgba) {
        self.calls.push(GpuCall::ClearColor(color));
    }

    fn set_viewport(&mut self, size: PixelSize) {
        self.calls.push(GpuCall::Viewport(size));
    }

    fn resize(&mut self, size: PixelSize) {
        self.calls.push(GpuCall::Resize(size));
    }

    fn max_dimension(&self) -> u32 {
        self.max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION)
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), SceneError> {
        if let Some((allowed, msg)) = &self.fail_draw {
            if self.draws.len() >= *allowed {
                return Err(SceneError::Surface(msg.clone()));
            }
        }
        self.calls.push(GpuCall::Draw(vertex_count));
        self.draws.push(vertex_count);
        Ok(())
    }
}

pub(crate) struct FakeSurface {
    size: PixelSize,
    fail_acquire: Option<String>,
    ctx: RecordingContext,
}

impl FakeSurface {
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            fail_acquire: None,
            ctx: RecordingContext::default(),
        }
    }

    pub fn failing_acquire(mut self, msg: &str) -> Self {
        self.fail_acquire = Some(msg.to_string());
        self
    }

    pub fn failing_program(mut self, err: ProgramError) -> Self {
        self.ctx.fail_program = Some(err);
        self
    }

    pub fn failing_draw(self, msg: &str) -> Self {
        self.failing_draw_after(0, msg)
    }

    /// Caps the surface size the context accepts.
    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.ctx.max_dimension = Some(max);
        self
    }

    /// Lets `allowed` draws succeed, then fails every draw after.
    pub fn failing_draw_after(mut self, allowed: usize, msg: &str) -> Self {
        self.ctx.fail_draw = Some((allowed, msg.to_string()));
        self
    }
}

impl RenderSurface for FakeSurface {
    type Context = RecordingContext;

    fn pixel_size(&self) -> PixelSize {
        self.size
    }

    fn acquire_context(self) -> anyhow::Result<RecordingContext> {
        if let Some(msg) = self.fail_acquire {
            anyhow::bail!("{msg}");
        }
        Ok(self.ctx)
    }
}
