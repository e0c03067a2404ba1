//! First-person movement with gravity, inertia and ray-cast grounding
//!
//! Grounding is recomputed every tick from geometry: the player rests on the
//! base stone layer when below `floor_threshold` cubes, or on grass when a
//! downward ray hits the grass batch within `ground_tolerance` cubes. Stone
//! above y = 0 is never collided with. There is no tunnelling guard beyond
//! that tolerance and the `max_delta` clamp.

use log::debug;

use crate::core::input::InputState;
use crate::core::types::{Quat, Vec2, Vec3};
use crate::math::Ray;
use crate::render::{BatchHandle, RayHit, RenderAdapter};
use super::config::MovementConfig;
use super::kinematics::PlayerKinematics;

/// Pitch limit in radians
const PITCH_LIMIT: f32 = 1.5;

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub grounded: bool,
    /// A jump started this tick
    pub jumped: bool,
    /// Became grounded this tick after being airborne
    pub landed: bool,
    /// Grass instance targeted by a break request this tick
    pub break_target: Option<RayHit>,
}

/// Ray-grounded first-person controller
pub struct GroundedMovementController {
    config: MovementConfig,
    cube_size: f32,
    kinematics: PlayerKinematics,
    /// Rotation around Y in radians (0 looks down -Z)
    yaw: f32,
    /// Rotation around local X in radians
    pitch: f32,
}

impl GroundedMovementController {
    /// Create a controller for a world of `cube_size` voxels, player at `spawn`
    pub fn new(config: MovementConfig, cube_size: f32, spawn: Vec3) -> Self {
        Self {
            config,
            cube_size,
            kinematics: PlayerKinematics::spawn(spawn),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &PlayerKinematics {
        &self.kinematics
    }

    /// Direct access for teleports and tests
    pub fn kinematics_mut(&mut self) -> &mut PlayerKinematics {
        &mut self.kinematics
    }

    pub fn set_fly_enabled(&mut self, enabled: bool) {
        self.config.fly_enabled = enabled;
    }

    /// Set orientation from angles (in radians)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Horizontal forward axis
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Horizontal right axis
    pub fn right(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }

    /// Camera view direction including pitch
    pub fn view_direction(&self) -> Vec3 {
        Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    /// Advance one tick.
    ///
    /// Order: look, damping, gravity, acceleration, grounding, jump,
    /// integration, break targeting. `grass` is the batch used both as the
    /// walkable surface and as the break target.
    pub fn update<R: RenderAdapter + ?Sized>(
        &mut self,
        input: &mut InputState,
        delta: f32,
        renderer: &R,
        grass: BatchHandle,
    ) -> TickOutcome {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.config.max_delta)
        } else {
            0.0
        };

        let (look_x, look_y) = input.take_look_delta();
        if look_x != 0.0 || look_y != 0.0 {
            self.yaw -= look_x * self.config.look_sensitivity;
            self.pitch = (self.pitch - look_y * self.config.look_sensitivity)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        let (axis_right, axis_forward) = input.movement_axes();
        let direction = Vec2::new(axis_right, axis_forward).normalize_or_zero();

        let cfg = &self.config;
        let cube = self.cube_size;
        let k = &mut self.kinematics;
        let was_grounded = k.grounded;

        k.velocity.x -= k.velocity.x * cfg.damping * delta;
        k.velocity.z -= k.velocity.z * cfg.damping * delta;
        k.velocity.y -= cfg.gravity * cfg.mass_factor * delta;

        if input.has_movement() {
            let accel = cfg.move_speed * cube * delta;
            k.velocity.x -= direction.x * accel;
            k.velocity.z -= direction.y * accel;
        }

        let grounded = if k.position.y < cfg.floor_threshold * cube {
            true
        } else {
            renderer
                .cast_ray(&Ray::down(k.position), cfg.ground_tolerance * cube, grass)
                .is_some()
        };
        if grounded {
            k.velocity.y = k.velocity.y.max(0.0);
            k.jumping = false;
        }
        k.grounded = grounded;

        if cfg.fly_enabled {
            k.velocity.y = k.velocity.y.max(0.0);
        }

        let mut jumped = false;
        if input.jump.take() && !k.jumping {
            k.velocity.y = cfg.jump_impulse;
            k.jumping = true;
            jumped = true;
            debug!("Jump from {:?}", k.position);
        }

        let right = Quat::from_rotation_y(self.yaw) * Vec3::X;
        let forward = Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z;
        k.position += right * (-k.velocity.x * delta) + forward * (-k.velocity.z * delta);
        k.position.y += k.velocity.y * delta;

        let landed = grounded && !was_grounded;
        if landed {
            debug!("Landed at {:?}", k.position);
        }

        let break_target = if input.break_block.take() {
            self.break_target(renderer, grass)
        } else {
            None
        };

        TickOutcome {
            grounded,
            jumped,
            landed,
            break_target,
        }
    }

    /// First instance of `batch` along the view ray within reach
    pub fn break_target<R: RenderAdapter + ?Sized>(
        &self,
        renderer: &R,
        batch: BatchHandle,
    ) -> Option<RayHit> {
        let ray = Ray::new(self.kinematics.position, self.view_direction());
        renderer.cast_ray(&ray, self.config.reach * self.cube_size, batch)
    }
}
