//! Point rendering scene.
//!
//! Responsibilities:
//! - own one point program and one dynamic vertex buffer on a single surface
//! - validate and upload flat vertex data (6 floats per vertex)
//! - issue one triangle-list draw call per redraw
//!
//! GPU work goes through the [`GpuContext`] seam; `render` provides the wgpu
//! implementation.

mod context;
mod error;
mod points;
mod program;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{GpuContext, ProgramDesc, RenderSurface, VertexAttr, VertexLayout};
pub use error::{Precondition, ProgramError, SceneError};
pub use points::{vertex_count_for, PointScene, SceneConfig, SceneState};
pub use program::{FLOATS_PER_VERTEX, POINT_LAYOUT, POINT_SHADER};
