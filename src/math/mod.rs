//! Geometric primitives and grid traversal

pub mod aabb;
pub mod ray;

pub use aabb::Aabb;
pub use ray::{GridTraversal, Ray};
