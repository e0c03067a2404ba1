//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```no_run
/// voxland::core::logging::init();
/// log::info!("Terrain ready");
/// ```
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with a custom default filter (still overridable via RUST_LOG).
pub fn init_with_default(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .init();
}
