//! Application configuration.
//!
//! Layered the same way every run: built-in defaults, then an optional
//! TOML file, then the documented environment variable overrides
//! (`SYM`, `INT`, `LAKE_ROOT`, `EXPORT_ROOT`, `EXPORT_MONTH`). The
//! resulting struct is constructed once in `main` and passed into each
//! step; nothing reads the environment after this point.

use crate::error::{AppError, AppResult};
use lakeport_core::ExportConfig;
use lakeport_server::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exporter configuration.
    #[serde(default)]
    pub export: ExportConfig,
    /// File server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration and apply environment overrides.
    ///
    /// Path resolution: explicit argument, then `LAKEPORT_CONFIG`, then
    /// `config/default.toml`. A missing file is not an error; defaults
    /// are used and a warning is logged.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var("LAKEPORT_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        config.export.apply_env_overrides();
        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
