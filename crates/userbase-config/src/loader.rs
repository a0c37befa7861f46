//! Configuration loader with layered sources.

use crate::{AppConfig, StoreBackend};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};
use userbase_core::{UserbaseError, UserbaseResult};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "USERBASE_ENVIRONMENT";

/// Prefix for environment variable overrides, e.g. `USERBASE__STORE__BACKEND`.
pub const ENV_PREFIX: &str = "USERBASE";

/// Loads the application configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `USERBASE` prefix and `__` separator
    pub fn new(config_dir: impl AsRef<str>) -> UserbaseResult<Self> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, &environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(config_dir: impl AsRef<str>, environment: &str) -> UserbaseResult<Self> {
        let config = Self::load_config(config_dir.as_ref(), environment)?;

        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> UserbaseResult<Self> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    #[must_use]
    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str, environment: &str) -> UserbaseResult<AppConfig> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_userbase_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates settings the process cannot start without.
pub fn validate_config(config: &AppConfig) -> UserbaseResult<()> {
    if config.store.table_name.trim().is_empty() {
        return Err(UserbaseError::Configuration(
            "store.table_name must not be empty".to_string(),
        ));
    }

    if config.store.backend == StoreBackend::Redis {
        if config.store.redis_url.trim().is_empty() {
            return Err(UserbaseError::Configuration(
                "store.redis_url is required for the redis backend".to_string(),
            ));
        }
        if config.store.pool_size == 0 {
            return Err(UserbaseError::Configuration(
                "store.pool_size must be greater than zero".to_string(),
            ));
        }
    }

    Ok(())
}

fn config_error_to_userbase_error(err: ConfigError) -> UserbaseError {
    UserbaseError::Configuration(err.to_string())
}
