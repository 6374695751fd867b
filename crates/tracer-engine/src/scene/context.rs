use crate::coords::{ColorRgba, PixelSize};

use super::{ProgramError, SceneError};

/// A drawable target the scene can bind to.
///
/// Supplied by the host at [`PointScene::init`](super::PointScene::init) and
/// consumed by it: a scene is bound to exactly one surface for its lifetime.
pub trait RenderSurface {
    type Context: GpuContext;

    /// Drawable size in physical pixels.
    fn pixel_size(&self) -> PixelSize;

    /// Acquires a GPU rendering context presenting to this surface.
    fn acquire_context(self) -> anyhow::Result<Self::Context>;
}

/// The GPU operations the point scene issues.
///
/// The scene owns ordering and validation; implementors only translate each
/// call to their API. Calls arrive in this order during init:
/// `build_program`, `allocate_vertex_buffer`, `set_clear_color`, `set_viewport`.
pub trait GpuContext {
    /// Compiles and links the program and makes it the active one.
    fn build_program(&mut self, desc: &ProgramDesc<'_>) -> Result<(), ProgramError>;

    /// Creates the single dynamic vertex buffer the program reads from.
    fn allocate_vertex_buffer(&mut self);

    /// Replaces the whole content of the vertex buffer with `data`.
    fn upload_vertices(&mut self, data: &[f32]);

    fn set_clear_color(&mut self, color: ColorRgba);

    fn set_viewport(&mut self, size: PixelSize);

    /// Resizes the underlying drawable. Does not draw.
    fn resize(&mut self, size: PixelSize);

    /// Largest width or height the drawable (and its depth target) may have.
    fn max_dimension(&self) -> u32;

    /// Clears and draws `vertex_count` vertices from the start of the buffer as
    /// a triangle list, then presents.
    ///
    /// Transient presentation problems are handled internally (the frame is
    /// skipped); only unrecoverable ones are returned.
    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), SceneError>;
}

/// One vertex attribute inside an interleaved float vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttr {
    pub location: u32,
    /// Number of f32 components (1..=4).
    pub components: u32,
    /// Offset from the start of the vertex, in floats.
    pub offset: u32,
}

/// Interleaved all-float vertex layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    /// Distance between consecutive vertices, in floats.
    pub stride: u32,
    pub attributes: &'static [VertexAttr],
}

impl VertexLayout {
    /// Stride in bytes.
    #[inline]
    pub const fn stride_bytes(&self) -> u64 {
        self.stride as u64 * std::mem::size_of::<f32>() as u64
    }

    /// Checks that every attribute lies inside the stride and that no two
    /// attributes share a location.
    pub fn validate(&self) -> Result<(), String> {
        for (i, a) in self.attributes.iter().enumerate() {
            if !(1..=4).contains(&a.components) {
                return Err(format!(
                    "attribute at location {} has {} components",
                    a.location, a.components
                ));
            }
            if a.offset + a.components > self.stride {
                return Err(format!(
                    "attribute at location {} overruns the {}-float stride",
                    a.location, self.stride
                ));
            }
            if self.attributes[..i].iter().any(|b| b.location == a.location) {
                return Err(format!("location {} bound twice", a.location));
            }
        }
        Ok(())
    }
}

/// Everything a backend needs to build the point program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub layout: VertexLayout,
    /// Straight-alpha blending of the fragment color over the target.
    pub alpha_blending: bool,
    /// Depth testing against a depth attachment sized to the surface.
    pub depth_test: bool,
}
