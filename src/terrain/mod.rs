//! Procedural terrain generation

pub mod noise_field;
pub use noise_field::{ConstantField, NoiseField, PerlinField};

pub mod params;
pub use params::TerrainParameters;

pub mod generator;
pub use generator::{GeneratedTerrain, TerrainGenerator};
