//! Noise-driven heightfield to stratified voxel columns

use log::{debug, info};

use crate::core::Result;
use crate::voxel::{Voxel, VoxelCategory, VoxelInstanceStore};
use super::noise_field::NoiseField;
use super::params::TerrainParameters;

/// Output of one generation pass: one dense store per category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTerrain {
    pub stone: VoxelInstanceStore,
    pub grass: VoxelInstanceStore,
    pub water: VoxelInstanceStore,
}

impl GeneratedTerrain {
    pub fn store(&self, category: VoxelCategory) -> &VoxelInstanceStore {
        match category {
            VoxelCategory::Stone => &self.stone,
            VoxelCategory::Grass => &self.grass,
            VoxelCategory::Water => &self.water,
        }
    }

    pub fn store_mut(&mut self, category: VoxelCategory) -> &mut VoxelInstanceStore {
        match category {
            VoxelCategory::Stone => &mut self.stone,
            VoxelCategory::Grass => &mut self.grass,
            VoxelCategory::Water => &mut self.water,
        }
    }

    /// Voxels across all categories
    pub fn total_count(&self) -> usize {
        self.stone.len() + self.grass.len() + self.water.len()
    }
}

/// Column-by-column terrain generator over a square plane
pub struct TerrainGenerator {
    params: TerrainParameters,
}

impl TerrainGenerator {
    /// Create a generator, rejecting invalid parameters up front so that
    /// generation itself cannot fail halfway.
    pub fn new(params: TerrainParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParameters {
        &self.params
    }

    /// Generate the full plane. Pure in `params` and `noise`.
    ///
    /// Per column `(i, k)`: one stone voxel at y = 0, grass for y in
    /// `[1, height)`, water for y in `[max(height, 1), water_level)`.
    pub fn generate(&self, noise: &impl NoiseField) -> GeneratedTerrain {
        let p = &self.params;
        let columns = p.column_count();
        info!(
            "Generating {}x{} terrain (seed {}, water level {})",
            p.plane_size, p.plane_size, p.seed, p.water_level
        );

        let mut stone = VoxelInstanceStore::with_capacity(VoxelCategory::Stone, columns);
        // Hint only; heights come from noise
        let grass_hint = columns.saturating_mul(p.noise_factor_add.clamp(1, 16) as usize);
        let mut grass = VoxelInstanceStore::with_capacity(VoxelCategory::Grass, grass_hint);
        let mut water = VoxelInstanceStore::new(VoxelCategory::Water);

        for i in 0..p.plane_size {
            for k in 0..p.plane_size {
                let (x, z) = (i as i32, k as i32);
                stone.append(Voxel::new(x, 0, z));

                let height = p.column_height(noise, i, k);
                for y in 1..height {
                    grass.append(Voxel::new(x, y, z));
                }
                for y in height.max(1)..p.water_level {
                    water.append(Voxel::new(x, y, z));
                }
            }
        }

        info!(
            "Terrain generated: {} stone, {} grass, {} water",
            stone.len(),
            grass.len(),
            water.len()
        );
        debug!("Spawn position: {:?}", p.spawn_position());

        GeneratedTerrain { stone, grass, water }
    }
}

/// Validate `params` and generate in one step
pub fn generate(params: &TerrainParameters, noise: &impl NoiseField) -> Result<GeneratedTerrain> {
    Ok(TerrainGenerator::new(params.clone())?.generate(noise))
}
