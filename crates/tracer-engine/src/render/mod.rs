//! wgpu implementation of the scene's GPU contract.
//!
//! [`WindowSurface`] binds a winit window; acquiring its context creates a
//! [`Gpu`](crate::device::Gpu) and wraps it in a [`WgpuContext`], which builds
//! the point pipeline and issues the draw calls.

mod common;
mod points;
mod surface;

pub use points::WgpuContext;
pub use surface::WindowSurface;
