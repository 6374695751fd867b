//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single tracer window.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
