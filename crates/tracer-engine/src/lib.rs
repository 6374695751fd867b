//! Tracer engine crate.
//!
//! Live GPU rendering of user-placed colored globs: a point scene that owns
//! the GPU program and vertex buffer, a space mapper that turns globs into
//! vertices, and a point store tying the two together. The window runtime
//! and input translation host it on a winit window.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod space;
pub mod store;
pub mod window;
