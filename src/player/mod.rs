//! First-person player: kinematic state and the ray-grounded movement controller

pub mod config;
pub mod kinematics;
pub mod controller;

pub use config::MovementConfig;
pub use kinematics::PlayerKinematics;
pub use controller::{GroundedMovementController, TickOutcome};
