//! Exporter configuration.
//!
//! Configuration is resolved once at startup and handed to each pipeline
//! step; no step reads the environment on its own. The environment
//! variables below override whatever the config file (or defaults)
//! provided:
//!
//! - `SYM`          symbol, default `BTCUSDT_PERP.A`
//! - `INT`          interval, default `1min`
//! - `LAKE_ROOT`    lake root directory, default `/data/lake`
//! - `EXPORT_ROOT`  export directory, default `/data/exports`
//! - `EXPORT_MONTH` month to export (`YYYY-MM`); empty or unset means
//!   auto-detect the newest month in the lake

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Market symbol (lake subdirectory).
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Candle interval (lake subdirectory).
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Root of the day-partitioned data lake.
    #[serde(default = "default_lake_root")]
    pub lake_root: PathBuf,
    /// Directory the export artifacts are written to.
    #[serde(default = "default_export_root")]
    pub export_root: PathBuf,
    /// Month to export; `None` means auto-detect the newest month.
    /// Not validated: a malformed value matches no day folders and is
    /// reported as missing data.
    #[serde(default)]
    pub month: Option<String>,
    /// Compatibility symlink created at this path pointing at
    /// `lake_root`. Creation failure is ignored. `None` disables it.
    #[serde(default = "default_compat_link")]
    pub compat_link: Option<PathBuf>,
    /// Write the monthly OHLCV file gzip-compressed.
    #[serde(default)]
    pub gzip_monthly: bool,
}

fn default_symbol() -> String {
    "BTCUSDT_PERP.A".to_string()
}

fn default_interval() -> String {
    "1min".to_string()
}

fn default_lake_root() -> PathBuf {
    PathBuf::from("/data/lake")
}

fn default_export_root() -> PathBuf {
    PathBuf::from("/data/exports")
}

fn default_compat_link() -> Option<PathBuf> {
    Some(PathBuf::from("/data/coinalyze"))
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            interval: default_interval(),
            lake_root: default_lake_root(),
            export_root: default_export_root(),
            month: None,
            compat_link: default_compat_link(),
            gzip_monthly: false,
        }
    }
}

impl ExportConfig {
    /// Apply the documented environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary lookup (used by tests).
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("SYM") {
            self.symbol = v;
        }
        if let Some(v) = get("INT") {
            self.interval = v;
        }
        if let Some(v) = get("LAKE_ROOT") {
            self.lake_root = PathBuf::from(v);
        }
        if let Some(v) = get("EXPORT_ROOT") {
            self.export_root = PathBuf::from(v);
        }
        if let Some(v) = get("EXPORT_MONTH") {
            // Empty string means "auto-detect", same as unset
            self.month = if v.is_empty() { None } else { Some(v) };
        }
    }
}
