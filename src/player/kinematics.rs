//! Player kinematic state

use crate::core::types::Vec3;

/// Position, velocity and grounding flags of the player.
///
/// Horizontal velocity is expressed in the controller's local frame
/// (x = right, z = forward) with the sign convention that negative values
/// move the player along the positive axis. Vertical velocity is world-space,
/// positive up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerKinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Resting on the floor or a grass voxel as of the last tick
    pub grounded: bool,
    /// A jump is in progress; cleared on landing
    pub jumping: bool,
}

impl PlayerKinematics {
    /// At rest, airborne, at `position`
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Horizontal speed in world units per second
    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_at_rest() {
        let k = PlayerKinematics::spawn(Vec3::new(1.0, 9.0, 1.0));
        assert_eq!(k.velocity, Vec3::ZERO);
        assert!(!k.grounded);
        assert!(!k.jumping);
    }

    #[test]
    fn test_horizontal_speed_ignores_vertical() {
        let k = PlayerKinematics {
            velocity: Vec3::new(3.0, -50.0, 4.0),
            ..Default::default()
        };
        assert_eq!(k.horizontal_speed(), 5.0);
    }
}
