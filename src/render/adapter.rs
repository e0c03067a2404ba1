//! Contract between the terrain core and the host renderer

use crate::core::Result;
use crate::core::types::Vec3;
use crate::math::Ray;
use crate::voxel::{Voxel, VoxelCategory};

/// Opaque identifier for one instanced batch issued by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchHandle(pub u32);

/// First instance struck by a ray query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the instance surface (0 if the origin is inside it)
    pub distance: f32,
    /// Current index of the instance in its batch (and in the backing store)
    pub instance_index: usize,
    /// World-space point of entry
    pub point: Vec3,
}

/// Host renderer seen from the core.
///
/// Batches are dense and index-addressable. `remove_instance` must use the
/// same swap-remove rule as `VoxelInstanceStore::remove` so indices stay 1:1
/// with the store.
pub trait RenderAdapter {
    /// Build the drawable batch for one category. Called once per category after generation.
    fn build_batch(
        &mut self,
        category: VoxelCategory,
        voxels: &[Voxel],
        cube_size: f32,
    ) -> BatchHandle;

    /// Mirror a store removal into the batch
    fn remove_instance(&mut self, handle: BatchHandle, index: usize) -> Result<()>;

    /// Closest instance of `handle` hit within `max_distance`, if any.
    ///
    /// A miss is a normal result, not an error.
    fn cast_ray(&self, ray: &Ray, max_distance: f32, handle: BatchHandle) -> Option<RayHit>;

    /// Player eye moved or turned
    fn update_camera(&mut self, _eye: Vec3, _forward: Vec3) {}
}
