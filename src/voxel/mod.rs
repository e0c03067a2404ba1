//! Voxel data structures and instance storage

pub mod voxel;
pub mod store;

pub use voxel::{Voxel, VoxelCategory};
pub use store::VoxelInstanceStore;
