//! Bootstrap utilities for churnsim binaries.

use std::path::{Path, PathBuf};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigError, LOG_ENV_VAR};

/// Initialize tracing with the CHURNSIM_LOG environment variable.
///
/// Defaults to "info" level if CHURNSIM_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load configuration, taking an optional file path from the first argument.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::args().nth(1);
    let config = Config::load(path.as_deref())?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

/// Create `dir` if needed and return `dir/file`.
pub fn output_path(dir: &Path, file: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.join(file))
}
