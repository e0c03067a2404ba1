//! Axis-aligned bounding box

use crate::core::types::{IVec3, Vec3};

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Axis-aligned cube of edge `size` centred on `center`
    pub fn cube(center: Vec3, size: f32) -> Self {
        Self::from_center_half_extent(center, Vec3::splat(size * 0.5))
    }

    /// Bounds of the cubes at cells `min_cell..=max_cell`, centred at `cell * size`
    pub fn from_cells(min_cell: IVec3, max_cell: IVec3, size: f32) -> Self {
        Self::new(
            (min_cell.as_vec3() - Vec3::splat(0.5)) * size,
            (max_cell.as_vec3() + Vec3::splat(0.5)) * size,
        )
    }
}
