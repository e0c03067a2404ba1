//! Render-side boundary: the adapter contract and a CPU instance-buffer implementation

pub mod adapter;
pub mod instanced;

pub use adapter::{BatchHandle, RayHit, RenderAdapter};
pub use instanced::{CameraState, InstanceBatch, InstanceRaw, InstancedBatches};
