//! Scene configuration: terrain and movement settings for one session

pub mod config;

pub use config::SceneConfig;
