//! Ordered glob list driving a point scene.

mod point_store;

pub use point_store::{PointStore, StoreError};
