//! Coherent 2-D noise sources for heightfields

use noise::{NoiseFn, Perlin};

/// Deterministic, smooth 2-D scalar field in [-1, 1].
///
/// Identical inputs always return identical outputs; nearby inputs return
/// nearby outputs. Implementations hold no mutable state after construction.
pub trait NoiseField {
    fn sample(&self, x: f64, z: f64) -> f64;
}

impl<T: NoiseField + ?Sized> NoiseField for &T {
    fn sample(&self, x: f64, z: f64) -> f64 {
        (**self).sample(x, z)
    }
}

/// Seeded Perlin gradient noise
#[derive(Clone, Debug)]
pub struct PerlinField {
    seed: u32,
    perlin: Perlin,
}

impl PerlinField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f64, z: f64) -> f64 {
        self.perlin.get([x, z]).clamp(-1.0, 1.0)
    }
}

/// Flat field returning the same value everywhere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField(f64);

impl ConstantField {
    /// `value` is clamped into [-1, 1]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }
}

impl NoiseField for ConstantField {
    fn sample(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}
