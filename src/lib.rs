//! Voxland - a procedurally generated voxel island with a grounded player

pub mod core;
pub mod math;
pub mod voxel;
pub mod terrain;
pub mod render;
pub mod player;
pub mod scene;
pub mod world;

pub use scene::SceneConfig;
pub use world::{BatchHandles, WorldState};
