//! Configuration Loader
//!
//! Environment-aware configuration loading: defaults, an optional TOML file,
//! and `TRAINER_`-prefixed environment overrides, merged in that order.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use super::TrainerConfig;
use crate::constants::system;
use crate::error::{Result, TrainerError};

/// Loaded configuration together with the environment it was resolved for
pub struct ConfigManager {
    config: TrainerConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection.
    ///
    /// The configuration file is optional: when neither `TRAINER_CONFIG_PATH`
    /// nor `trainer-config.toml` points at an existing file, defaults plus
    /// environment overrides are used.
    pub fn load() -> Result<Arc<ConfigManager>> {
        let path = env::var(system::CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("trainer-config.toml"));
        Self::load_from_path(&path)
    }

    /// Load configuration from an explicit file path (file may be absent)
    pub fn load_from_path(path: &Path) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();

        debug!(
            environment = %environment,
            path = %path.display(),
            "Loading trainer configuration"
        );

        let mut builder = Config::builder().add_source(
            Config::try_from(&TrainerConfig::default())
                .map_err(|e| TrainerError::Configuration(e.to_string()))?,
        );

        if path.exists() {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let config: TrainerConfig = builder
            .add_source(Environment::with_prefix("TRAINER").separator("__"))
            .build()
            .map_err(|e| TrainerError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TrainerError::Configuration(e.to_string()))?;

        config.validate()?;

        Ok(Arc::new(ConfigManager {
            config,
            environment,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Environment the configuration was resolved for
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn detect_environment() -> String {
        env::var(system::ENV_VAR).unwrap_or_else(|_| "development".to_string())
    }
}
