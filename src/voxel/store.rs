//! Dense per-category voxel sequence backing one instanced batch
//!
//! Order is insertion order until the first removal. Removal is swap-remove:
//! the last voxel moves into the freed slot, so indices are not stable across
//! removals. There are never gaps; `len()` is the live instance count.

use crate::core::{Error, Result};
use super::voxel::{Voxel, VoxelCategory};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelInstanceStore {
    category: VoxelCategory,
    voxels: Vec<Voxel>,
}

impl VoxelInstanceStore {
    /// Create an empty store for `category`
    pub fn new(category: VoxelCategory) -> Self {
        Self {
            category,
            voxels: Vec::new(),
        }
    }

    /// Create an empty store with room for `capacity` voxels
    pub fn with_capacity(category: VoxelCategory, capacity: usize) -> Self {
        Self {
            category,
            voxels: Vec::with_capacity(capacity),
        }
    }

    pub fn category(&self) -> VoxelCategory {
        self.category
    }

    /// Append a voxel at the end (amortized O(1))
    pub fn append(&mut self, voxel: Voxel) {
        self.voxels.push(voxel);
    }

    /// Swap-remove the voxel at `index` and return it.
    ///
    /// The voxel previously at `len() - 1` now lives at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Voxel> {
        let len = self.voxels.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.voxels.swap_remove(index))
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Voxel at `index`, if in range
    pub fn at(&self, index: usize) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    /// Contiguous view, in current instance order
    pub fn as_slice(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Voxel> {
        self.voxels.iter()
    }

    /// Linear search for a voxel's current index. Intended for tests and tooling.
    pub fn position_of(&self, voxel: &Voxel) -> Option<usize> {
        self.voxels.iter().position(|v| v == voxel)
    }
}

impl<'a> IntoIterator for &'a VoxelInstanceStore {
    type Item = &'a Voxel;
    type IntoIter = std::slice::Iter<'a, Voxel>;

    fn into_iter(self) -> Self::IntoIter {
        self.voxels.iter()
    }
}
