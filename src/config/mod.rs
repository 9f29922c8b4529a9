//! Application configuration.
//!
//! Aggregates generator, path and report settings into a single Config struct
//! that can be loaded from YAML files or environment variables. Every
//! field has a default, so an empty environment generates the standard
//! 500-customer dataset.

mod reports;
mod simulation;

pub use reports::{ChurnRiskConfig, ForecastConfig};
pub use simulation::{PathsConfig, SimulationConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "churnsim.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "CHURNSIM_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "CHURNSIM";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "CHURNSIM_LOG";

use serde::Deserialize;

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid simulation window: {0}")]
    InvalidWindow(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator parameters.
    pub simulation: SimulationConfig,
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Churn-risk rule thresholds.
    pub churn_risk: ChurnRiskConfig,
    /// Forecast horizon and chart settings.
    pub forecast: ForecastConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `churnsim.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single YAML file, without env overrides.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()
    }
}
