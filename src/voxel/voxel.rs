//! Voxel data type and terrain categories

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Vec3};
use crate::math::Aabb;

/// Terrain category. Decides which instance store (and batch) holds a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoxelCategory {
    Stone,
    Grass,
    Water,
}

impl VoxelCategory {
    /// All categories in batch build order
    pub const ALL: [VoxelCategory; 3] = [Self::Stone, Self::Grass, Self::Water];

    pub fn name(self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Grass => "grass",
            Self::Water => "water",
        }
    }
}

impl std::fmt::Display for VoxelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Single voxel: an integer grid cell. Its category is implied by the store holding it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub position: IVec3,
}

impl Voxel {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            position: IVec3::new(x, y, z),
        }
    }

    /// World-space centre for cubes of edge `cube_size`
    pub fn world_center(&self, cube_size: f32) -> Vec3 {
        self.position.as_vec3() * cube_size
    }

    /// World-space bounds for cubes of edge `cube_size`
    pub fn bounds(&self, cube_size: f32) -> Aabb {
        Aabb::cube(self.world_center(cube_size), cube_size)
    }
}

impl From<IVec3> for Voxel {
    fn from(position: IVec3) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_center_scales_all_axes() {
        let voxel = Voxel::new(2, 3, -1);
        assert_eq!(voxel.world_center(0.5), Vec3::new(1.0, 1.5, -0.5));
    }

    #[test]
    fn test_bounds() {
        let bounds = Voxel::new(0, 1, 0).bounds(2.0);
        assert_eq!(bounds.min, Vec3::new(-1.0, 1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{:>6}", VoxelCategory::Stone), " stone");
        assert_eq!(VoxelCategory::Water.to_string(), "water");
    }
}
