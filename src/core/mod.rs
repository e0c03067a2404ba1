//! Core types, errors, logging and input state

pub mod types;
pub mod error;
pub mod logging;
pub mod input;

pub use types::*;
pub use error::Error;
pub use input::{InputState, Trigger};
