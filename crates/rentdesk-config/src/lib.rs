//! # rentdesk-config
//!
//! Layered configuration loading for rentdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RENTDESK_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `./rentdesk.toml`
//! 4. User-level `~/.config/rentdesk/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RENTDESK_DATABASE__PATH` -> `database.path`,
//! `RENTDESK_MAINTENANCE__MIN_DESCRIPTION_LEN` -> `maintenance.min_description_len`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rentdesk_config::RentConfig;
//!
//! let config = RentConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("listening on {}", config.server.bind);
//! ```

mod database;
mod error;
mod maintenance;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use maintenance::MaintenanceConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RentConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
}

impl RentConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an extra TOML file layered above the
    /// project file and below the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `path` does not exist, or
    /// `ConfigError::Figment` if extraction fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "config".into(),
                reason: format!("file '{}' does not exist", path.display()),
            });
        }
        Self::layered(Some(path)).extract().map_err(ConfigError::from)
    }

    /// Build the default figment provider chain.
    pub fn figment() -> Figment {
        Self::layered(None)
    }

    fn layered(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from("rentdesk.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("RENTDESK_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rentdesk").join("config.toml"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.server.validate()?;
        self.maintenance.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.maintenance.min_description_len, 10);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: RentConfig = RentConfig::figment().extract()?;
            assert_eq!(config.database.path, "rentdesk.db");
            assert_eq!(config.maintenance.max_issue_len, 100);
            Ok(())
        });
    }
}
