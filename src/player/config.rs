//! Movement tuning

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Constants for the grounded movement controller.
///
/// Distances marked "cubes" are multiplied by the world's cube size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Gravitational acceleration
    pub gravity: f32,
    /// Multiplier on gravity
    pub mass_factor: f32,
    /// Horizontal velocity decay rate per second
    pub damping: f32,
    /// Horizontal acceleration while a direction is held (cubes/s^2)
    pub move_speed: f32,
    /// Vertical velocity set on jump
    pub jump_impulse: f32,
    /// Below this altitude (cubes) the player rests on the base stone layer
    pub floor_threshold: f32,
    /// Max downward ray distance (cubes) that still counts as standing on grass
    pub ground_tolerance: f32,
    /// Never accumulate downward velocity
    pub fly_enabled: bool,
    /// Break ray length (cubes)
    pub reach: f32,
    /// Radians per raw look unit
    pub look_sensitivity: f32,
    /// Longest tick (seconds) integrated in one step
    pub max_delta: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_factor: 3.0,
            damping: 10.0,
            move_speed: 60.0,
            jump_impulse: 9.0,
            floor_threshold: 1.5,
            ground_tolerance: 1.0,
            fly_enabled: false,
            reach: 6.0,
            look_sensitivity: 0.002,
            max_delta: 0.1,
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("gravity", self.gravity),
            ("mass_factor", self.mass_factor),
            ("damping", self.damping),
            ("move_speed", self.move_speed),
            ("jump_impulse", self.jump_impulse),
            ("floor_threshold", self.floor_threshold),
            ("ground_tolerance", self.ground_tolerance),
            ("look_sensitivity", self.look_sensitivity),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidParameters(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [("reach", self.reach), ("max_delta", self.max_delta)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameters(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
