//! Configuration management
//!
//! Layering: built-in defaults, `config/default.toml`, `config/{APP_ENV}.toml`,
//! then `TODO__*` environment variables (e.g. `TODO__API__BASE_URL`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_TOKEN_PATH};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// No timeout is applied when absent.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// Directory for the rolling log file; stdout only when absent.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("session.token_path", DEFAULT_TOKEN_PATH)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .add_source(File::from(config_dir.join("default")).required(false))
            .add_source(File::from(config_dir.join(&env)).required(false))
            .add_source(
                Environment::with_prefix("TODO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
