//! Ray type and operations

use crate::core::types::{IVec3, Vec3};
use super::aabb::Aabb;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Straight down from `origin`
    pub fn down(origin: Vec3) -> Self {
        Self::new(origin, Vec3::NEG_Y)
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }

    /// Walk the cube grid of edge `cell_size` along this ray, up to `max_distance`.
    pub fn traverse_grid(&self, cell_size: f32, max_distance: f32) -> GridTraversal {
        GridTraversal::new(self, cell_size, max_distance)
    }
}

/// Amanatides-Woo traversal over a grid of cubes centred at `cell * cell_size`.
///
/// Yields each visited cell with the distance along the ray at which it is
/// entered (0 for the cell containing the origin).
#[derive(Clone, Debug)]
pub struct GridTraversal {
    cell: IVec3,
    step: IVec3,
    t_max: Vec3,
    t_delta: Vec3,
    t: f32,
    max_distance: f32,
}

impl GridTraversal {
    pub fn new(ray: &Ray, cell_size: f32, max_distance: f32) -> Self {
        // Shift so cell boundaries land on integers
        let q = ray.origin / cell_size + Vec3::splat(0.5);
        let cell = q.floor().as_ivec3();

        let mut step = IVec3::ZERO;
        let mut t_max = Vec3::splat(f32::INFINITY);
        let mut t_delta = Vec3::splat(f32::INFINITY);

        for axis in 0..3 {
            let d = ray.direction[axis] / cell_size;
            if d > 0.0 {
                step[axis] = 1;
                t_max[axis] = ((cell[axis] + 1) as f32 - q[axis]) / d;
                t_delta[axis] = 1.0 / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_max[axis] = (cell[axis] as f32 - q[axis]) / d;
                t_delta[axis] = -1.0 / d;
            }
        }

        Self {
            cell,
            step,
            t_max,
            t_delta,
            t: 0.0,
            max_distance,
        }
    }
}

impl Iterator for GridTraversal {
    type Item = (IVec3, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.t.is_nan() || self.t > self.max_distance {
            return None;
        }
        let current = (self.cell, self.t);

        let axis = if self.t_max.x < self.t_max.y {
            if self.t_max.x < self.t_max.z { 0 } else { 2 }
        } else if self.t_max.y < self.t_max.z {
            1
        } else {
            2
        };
        self.t = self.t_max[axis];
        self.cell[axis] += self.step[axis];
        self.t_max[axis] += self.t_delta[axis];

        Some(current)
    }
}
