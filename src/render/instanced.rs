//! CPU-side instance buffers with an O(1) cell index for ray queries
//!
//! Each batch keeps a dense `Vec<InstanceRaw>` ready for upload plus a
//! cell -> index map, so ray casts walk the voxel grid instead of testing
//! every instance.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use log::{debug, warn};

use crate::core::{Error, Result};
use crate::core::types::{IVec3, Vec3};
use crate::math::{Aabb, Ray};
use crate::voxel::{Voxel, VoxelCategory};
use super::adapter::{BatchHandle, RayHit, RenderAdapter};

/// Per-instance GPU data (must match the instancing vertex layout)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// World-space cube centre
    pub translation: [f32; 3],
    /// Cube edge length
    pub scale: f32,
}

impl InstanceRaw {
    pub fn from_voxel(voxel: &Voxel, cube_size: f32) -> Self {
        Self {
            translation: voxel.world_center(cube_size).to_array(),
            scale: cube_size,
        }
    }
}

/// One category's instances
#[derive(Clone, Debug)]
pub struct InstanceBatch {
    category: VoxelCategory,
    cube_size: f32,
    instances: Vec<InstanceRaw>,
    /// Grid cell of each instance, parallel to `instances`
    cells: Vec<IVec3>,
    lookup: HashMap<IVec3, usize>,
    /// Covers every cell ever built into the batch; removals do not shrink it
    bounds: Aabb,
    dirty: bool,
}

impl InstanceBatch {
    fn new(category: VoxelCategory, voxels: &[Voxel], cube_size: f32) -> Self {
        let instances = voxels.iter().map(|v| InstanceRaw::from_voxel(v, cube_size)).collect();
        let cells: Vec<IVec3> = voxels.iter().map(|v| v.position).collect();
        let lookup = cells.iter().enumerate().map(|(i, c)| (*c, i)).collect();
        let bounds = match cells.first() {
            Some(&first) => {
                let (min, max) = cells
                    .iter()
                    .fold((first, first), |(min, max), &c| (min.min(c), max.max(c)));
                // One-cell margin so rays starting on an outer face still enter
                Aabb::from_cells(min - IVec3::ONE, max + IVec3::ONE, cube_size)
            }
            None => Aabb::default(),
        };
        Self {
            category,
            cube_size,
            instances,
            cells,
            lookup,
            bounds,
            dirty: true,
        }
    }

    pub fn category(&self) -> VoxelCategory {
        self.category
    }

    pub fn cube_size(&self) -> f32 {
        self.cube_size
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Needs re-upload since the last `take_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Index of the instance occupying `cell`
    pub fn index_at(&self, cell: IVec3) -> Option<usize> {
        self.lookup.get(&cell).copied()
    }

    /// Swap-remove, keeping the cell index in sync. Returns the removed cell.
    fn remove(&mut self, index: usize) -> Result<IVec3> {
        let len = self.instances.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.instances.swap_remove(index);
        let removed = self.cells.swap_remove(index);
        self.lookup.remove(&removed);
        if let Some(moved) = self.cells.get(index) {
            self.lookup.insert(*moved, index);
        }
        self.dirty = true;
        Ok(removed)
    }

    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        if self.lookup.is_empty() {
            return None;
        }
        // Never walk past the far side of the batch
        let (_, exit) = ray.intersects_aabb(&self.bounds)?;
        ray.traverse_grid(self.cube_size, max_distance.min(exit))
            .find_map(|(cell, entry)| {
                let index = self.index_at(cell)?;
                // Slab test refines the grid entry distance against float drift
                let distance = ray
                    .intersects_aabb(&Voxel::from(cell).bounds(self.cube_size))
                    .map_or(entry, |(near, _)| near);
                Some(RayHit {
                    distance,
                    instance_index: index,
                    point: ray.at(distance),
                })
            })
            .filter(|hit| hit.distance <= max_distance)
    }
}

/// Eye position and view direction last pushed by the controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub forward: Vec3,
}

/// Headless renderer: holds instance buffers and answers ray queries.
#[derive(Debug, Default)]
pub struct InstancedBatches {
    batches: Vec<InstanceBatch>,
    camera: Option<CameraState>,
}

impl InstancedBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self, handle: BatchHandle) -> Option<&InstanceBatch> {
        self.batches.get(handle.0 as usize)
    }

    fn batch_mut(&mut self, handle: BatchHandle) -> Result<&mut InstanceBatch> {
        self.batches
            .get_mut(handle.0 as usize)
            .ok_or(Error::UnknownBatch(handle))
    }

    /// Batches changed since the last call; clears their dirty flags.
    pub fn take_dirty(&mut self) -> Vec<BatchHandle> {
        self.batches
            .iter_mut()
            .enumerate()
            .filter(|(_, batch)| batch.dirty)
            .map(|(i, batch)| {
                batch.dirty = false;
                BatchHandle(i as u32)
            })
            .collect()
    }

    /// Instances across all batches
    pub fn total_instances(&self) -> usize {
        self.batches.iter().map(InstanceBatch::len).sum()
    }

    pub fn camera(&self) -> Option<CameraState> {
        self.camera
    }
}

impl RenderAdapter for InstancedBatches {
    fn build_batch(
        &mut self,
        category: VoxelCategory,
        voxels: &[Voxel],
        cube_size: f32,
    ) -> BatchHandle {
        let handle = BatchHandle(self.batches.len() as u32);
        self.batches.push(InstanceBatch::new(category, voxels, cube_size));
        debug!("Built {} batch {:?} with {} instances", category, handle, voxels.len());
        handle
    }

    fn remove_instance(&mut self, handle: BatchHandle, index: usize) -> Result<()> {
        let cell = self.batch_mut(handle)?.remove(index)?;
        debug!("Removed instance {} ({:?}) from batch {:?}", index, cell, handle);
        Ok(())
    }

    fn cast_ray(&self, ray: &Ray, max_distance: f32, handle: BatchHandle) -> Option<RayHit> {
        match self.batch(handle) {
            Some(batch) => batch.cast_ray(ray, max_distance),
            None => {
                warn!("Ray cast against unknown batch {:?}", handle);
                None
            }
        }
    }

    fn update_camera(&mut self, eye: Vec3, forward: Vec3) {
        self.camera = Some(CameraState { eye, forward });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(n: i32) -> Vec<Voxel> {
        (0..n).map(|y| Voxel::new(0, y, 0)).collect()
    }

    #[test]
    fn test_instance_raw_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 16);
        let raw = InstanceRaw::from_voxel(&Voxel::new(1, 2, 3), 0.5);
        assert_eq!(raw.translation, [0.5, 1.0, 1.5]);
        assert_eq!(raw.scale, 0.5);
    }

    #[test]
    fn test_build_batch_issues_distinct_handles() {
        let mut renderer = InstancedBatches::new();
        let a = renderer.build_batch(VoxelCategory::Stone, &column(2), 1.0);
        let b = renderer.build_batch(VoxelCategory::Grass, &column(3), 1.0);

        assert_ne!(a, b);
        assert_eq!(renderer.batch(b).unwrap().len(), 3);
        assert_eq!(renderer.batch(b).unwrap().category(), VoxelCategory::Grass);
        assert_eq!(renderer.batch(a).unwrap().as_bytes().len(), 32);
        assert_eq!(renderer.total_instances(), 5);
    }

    #[test]
    fn test_remove_mirrors_swap_remove_and_index() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(10), 1.0);
        renderer.take_dirty();

        renderer.remove_instance(handle, 5).unwrap();
        let batch = renderer.batch(handle).unwrap();

        assert_eq!(batch.len(), 9);
        assert_eq!(batch.instances()[5].translation, [0.0, 9.0, 0.0]);
        assert_eq!(batch.index_at(IVec3::new(0, 9, 0)), Some(5));
        assert_eq!(batch.index_at(IVec3::new(0, 5, 0)), None);
        assert!(batch.is_dirty());
        assert_eq!(renderer.take_dirty(), vec![handle]);
        assert!(renderer.take_dirty().is_empty());
    }

    #[test]
    fn test_remove_errors() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(1), 1.0);

        assert!(matches!(
            renderer.remove_instance(handle, 1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(
            renderer.remove_instance(BatchHandle(9), 0),
            Err(Error::UnknownBatch(BatchHandle(9)))
        ));
        renderer.remove_instance(handle, 0).unwrap();
        assert!(renderer.batch(handle).unwrap().is_empty());
    }

    #[test]
    fn test_cast_ray_down_hits_top_of_column() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(4), 1.0);

        // Column top surface is at y = 3.5
        let hit = renderer
            .cast_ray(&Ray::down(Vec3::new(0.0, 5.0, 0.0)), 10.0, handle)
            .unwrap();
        assert_eq!(hit.instance_index, 3);
        assert!((hit.distance - 1.5).abs() < 1e-4);
        assert!((hit.point.y - 3.5).abs() < 1e-4);
    }

    #[test]
    fn test_cast_ray_respects_max_distance() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(1), 1.0);

        let ray = Ray::down(Vec3::new(0.0, 3.0, 0.0));
        assert!(renderer.cast_ray(&ray, 2.0, handle).is_none());
        assert!(renderer.cast_ray(&ray, 2.5, handle).is_some());
    }

    #[test]
    fn test_cast_ray_unbounded_reach() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(1), 1.0);

        // Pointing away: rejected by the batch bounds
        let up = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(renderer.cast_ray(&up, f32::INFINITY, handle).is_none());

        // Passing beside the batch: walk stops at the far side of the bounds
        let beside = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(renderer.cast_ray(&beside, f32::INFINITY, handle).is_none());

        let down = Ray::down(Vec3::new(0.0, 5.0, 0.0));
        let hit = renderer.cast_ray(&down, f32::INFINITY, handle).unwrap();
        assert_eq!(hit.instance_index, 0);
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_cast_ray_from_batch_face() {
        // Origin exactly on the outer face of the edge column
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(2), 1.0);

        let hit = renderer
            .cast_ray(&Ray::down(Vec3::new(-0.5, 3.0, 0.0)), 3.0, handle)
            .unwrap();
        assert_eq!(hit.instance_index, 1);
    }

    #[test]
    fn test_cast_ray_misses_and_unknown_batch() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(3), 1.0);

        let ray = Ray::down(Vec3::new(4.0, 5.0, 0.0));
        assert!(renderer.cast_ray(&ray, 100.0, handle).is_none());
        assert!(renderer.cast_ray(&ray, 100.0, BatchHandle(7)).is_none());
    }

    #[test]
    fn test_cast_ray_from_inside_cube() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(2), 1.0);

        let hit = renderer
            .cast_ray(&Ray::down(Vec3::new(0.1, 1.2, 0.1)), 1.0, handle)
            .unwrap();
        assert_eq!(hit.instance_index, 1);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_cast_ray_sees_removed_cell_as_empty() {
        let mut renderer = InstancedBatches::new();
        let handle = renderer.build_batch(VoxelCategory::Grass, &column(3), 1.0);
        renderer.remove_instance(handle, 2).unwrap();

        let hit = renderer
            .cast_ray(&Ray::down(Vec3::new(0.0, 4.0, 0.0)), 10.0, handle)
            .unwrap();
        assert_eq!(hit.instance_index, 1);
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_cast_ray_scaled_cubes() {
        let mut renderer = InstancedBatches::new();
        let voxels = [Voxel::new(3, 1, 0)];
        let handle = renderer.build_batch(VoxelCategory::Grass, &voxels, 2.0);

        // Cube centred at (6, 2, 0) spans x in [5, 7]
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::X);
        let hit = renderer.cast_ray(&ray, 20.0, handle).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_update_camera_recorded() {
        let mut renderer = InstancedBatches::new();
        assert!(renderer.camera().is_none());
        renderer.update_camera(Vec3::ONE, Vec3::NEG_Z);
        assert_eq!(renderer.camera().unwrap().forward, Vec3::NEG_Z);
    }
}
