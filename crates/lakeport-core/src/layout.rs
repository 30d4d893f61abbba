//! Path construction for the day-partitioned data lake and export dir.
//!
//! Lake layout: `LAKE_ROOT/SYMBOL/INTERVAL/YYYY-MM-DD*/` where each day
//! folder holds `ohlcv.jsonl` plus other per-day endpoint files. Export
//! artifacts land flat in `EXPORT_ROOT` and are named after the symbol,
//! interval and month so one directory can hold several series.

use crate::config::ExportConfig;
use crate::error::CoreResult;
use crate::month::MonthKey;
use std::path::{Path, PathBuf};

/// Name of the per-day candle file inside each day folder.
pub const OHLCV_FILE: &str = "ohlcv.jsonl";

/// Name of the generated export index page.
pub const INDEX_FILE: &str = "index.html";

/// Resolved lake/export paths for one symbol and interval.
#[derive(Debug, Clone)]
pub struct LakeLayout {
    lake_root: PathBuf,
    export_root: PathBuf,
    symbol: String,
    interval: String,
}

impl LakeLayout {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            lake_root: config.lake_root.clone(),
            export_root: config.export_root.clone(),
            symbol: config.symbol.clone(),
            interval: config.interval.clone(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> &str {
        &self.interval
    }

    pub fn export_root(&self) -> &Path {
        &self.export_root
    }

    /// The per-symbol/per-interval directory holding the day folders.
    pub fn source_dir(&self) -> PathBuf {
        self.lake_root.join(&self.symbol).join(&self.interval)
    }

    /// List day-folder names under the source directory, sorted
    /// lexicographically. Non-directories and names that do not look
    /// like `YYYY-MM-DD...` are skipped.
    pub fn day_dir_names(&self) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.source_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if MonthKey::from_day_dir_name(&name).is_some() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Day-folder names belonging to one month, sorted.
    pub fn month_day_dir_names(&self, month: &MonthKey) -> CoreResult<Vec<String>> {
        let mut names = self.day_dir_names()?;
        names.retain(|n| month.contains_day(n));
        Ok(names)
    }

    pub fn day_dir(&self, day_name: &str) -> PathBuf {
        self.source_dir().join(day_name)
    }

    /// `{SYMBOL}_{INTERVAL}_{MONTH}_ohlcv.jsonl`, with a `.gz` suffix
    /// when the monthly file is written compressed.
    pub fn monthly_ohlcv_name(&self, month: &MonthKey, gzip: bool) -> String {
        let suffix = if gzip { ".gz" } else { "" };
        format!(
            "{}_{}_{}_ohlcv.jsonl{}",
            self.symbol, self.interval, month, suffix
        )
    }

    /// `{SYMBOL}_{INTERVAL}_{MONTH}_ALL.tgz`
    pub fn monthly_archive_name(&self, month: &MonthKey) -> String {
        format!("{}_{}_{}_ALL.tgz", self.symbol, self.interval, month)
    }

    pub fn monthly_ohlcv_path(&self, month: &MonthKey, gzip: bool) -> PathBuf {
        self.export_root.join(self.monthly_ohlcv_name(month, gzip))
    }

    pub fn monthly_archive_path(&self, month: &MonthKey) -> PathBuf {
        self.export_root.join(self.monthly_archive_name(month))
    }

    pub fn index_path(&self) -> PathBuf {
        self.export_root.join(INDEX_FILE)
    }
}
