//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) for a window
//! - acquiring frames and providing encoders/views for rendering

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
