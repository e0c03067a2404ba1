//! Terrain generation parameters

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::core::types::Vec3;
use super::noise_field::NoiseField;

/// Parameters controlling terrain generation.
///
/// Immutable for the lifetime of one generated world; changing any value
/// means regenerating from scratch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    /// Columns per side of the square plane
    pub plane_size: u32,
    /// Edge length of one voxel in world units
    pub cube_size: f32,
    /// Horizontal noise period in columns (larger = smoother hills)
    pub noise_factor_xz: f64,
    /// Height amplitude in voxels
    pub noise_factor_y: f64,
    /// Vertical bias added after flooring
    pub noise_factor_add: i32,
    /// Water fills columns up to (excluding) this layer
    pub water_level: i32,
    pub seed: u32,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            plane_size: 90,
            cube_size: 1.0,
            noise_factor_xz: 20.0,
            noise_factor_y: 6.0,
            noise_factor_add: 5,
            water_level: 4,
            seed: 12345,
        }
    }
}

impl TerrainParameters {
    /// Reject parameter sets that cannot produce a world
    pub fn validate(&self) -> Result<()> {
        if self.plane_size == 0 {
            return Err(Error::InvalidParameters("plane_size must be positive".into()));
        }
        if !(self.cube_size.is_finite() && self.cube_size > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "cube_size must be positive and finite, got {}",
                self.cube_size
            )));
        }
        if self.water_level < 0 {
            return Err(Error::InvalidParameters(format!(
                "water_level must not be negative, got {}",
                self.water_level
            )));
        }
        if !(self.noise_factor_xz.is_finite() && self.noise_factor_xz > 0.0) {
            return Err(Error::InvalidParameters(format!(
                "noise_factor_xz must be positive and finite, got {}",
                self.noise_factor_xz
            )));
        }
        if !self.noise_factor_y.is_finite() {
            return Err(Error::InvalidParameters("noise_factor_y must be finite".into()));
        }
        Ok(())
    }

    /// Terrain height (in voxels) of column `(i, k)`
    pub fn column_height(&self, noise: &impl NoiseField, i: u32, k: u32) -> i32 {
        let nx = i as f64 / self.noise_factor_xz;
        let nz = k as f64 / self.noise_factor_xz;
        let scaled = (noise.sample(nx, nz) * self.noise_factor_y).floor();
        (scaled as i32).saturating_add(self.noise_factor_add)
    }

    /// Upper bound on any column height for a noise field in [-1, 1]
    pub fn max_expected_height(&self) -> i32 {
        (self.noise_factor_y.abs().ceil() as i32).saturating_add(self.noise_factor_add)
    }

    /// Total number of columns
    pub fn column_count(&self) -> usize {
        self.plane_size as usize * self.plane_size as usize
    }

    /// Centre of the plane, two voxels above the highest possible surface
    pub fn spawn_position(&self) -> Vec3 {
        let center = (self.plane_size.saturating_sub(1)) as f32 * self.cube_size * 0.5;
        let top = self.max_expected_height().max(self.water_level).saturating_add(2);
        Vec3::new(center, top as f32 * self.cube_size, center)
    }
}
