//! Export pipeline orchestration.
//!
//! A strictly linear run: ensure dirs → resolve month → merge → pack →
//! index. Merge and pack failures are demoted to warnings so the serve
//! step always gets a directory to serve; only export-directory creation
//! (and later, the server bind) is fatal.

use crate::detect::latest_month;
use crate::error::ExportResult;
use crate::index::write_index;
use crate::merge::{merge_month, MergeOutcome};
use crate::pack::{pack_month, PackOutcome};
use lakeport_core::{ExportConfig, LakeLayout, MonthKey};
use tracing::{debug, info, warn};

/// How an optional pipeline step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus<T> {
    /// Step never ran (no month resolved).
    NotRun,
    /// Step ran and produced an outcome (possibly a skip).
    Done(T),
    /// Step errored; the pipeline logged it and moved on.
    Failed(String),
}

/// What one pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub month: Option<MonthKey>,
    pub merge: StepStatus<MergeOutcome>,
    pub pack: StepStatus<PackOutcome>,
    /// Entries listed in the generated index.
    pub indexed: usize,
}

/// The monthly export pipeline.
pub struct ExportPipeline {
    config: ExportConfig,
    layout: LakeLayout,
    /// Serving port, named in the index caption.
    port: u16,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig, port: u16) -> Self {
        let layout = LakeLayout::from_config(&config);
        Self {
            config,
            layout,
            port,
        }
    }

    /// Run the pipeline once.
    ///
    /// Fatal only when the export directory cannot be created or the
    /// index cannot be written; everything else degrades to warnings.
    pub fn run(&self) -> ExportResult<ExportReport> {
        std::fs::create_dir_all(self.layout.export_root())?;
        self.ensure_compat_link();

        let month = self.resolve_month();

        let (merge, pack) = match &month {
            Some(month) => (self.run_merge(month), self.run_pack(month)),
            None => {
                warn!("No export month resolved, serving existing artifacts only");
                (StepStatus::NotRun, StepStatus::NotRun)
            }
        };

        let indexed = write_index(&self.layout, self.port)?;

        Ok(ExportReport {
            month,
            merge,
            pack,
            indexed,
        })
    }

    /// Explicitly configured month wins; otherwise scan the lake.
    fn resolve_month(&self) -> Option<MonthKey> {
        match &self.config.month {
            Some(raw) => {
                let month = MonthKey::from_raw(raw.clone());
                info!(%month, "Using configured export month");
                Some(month)
            }
            None => {
                let month = latest_month(&self.layout);
                match &month {
                    Some(m) => info!(month = %m, "Auto-detected latest month"),
                    None => debug!("Auto-detection found no month"),
                }
                month
            }
        }
    }

    fn run_merge(&self, month: &MonthKey) -> StepStatus<MergeOutcome> {
        match merge_month(&self.layout, month, self.config.gzip_monthly) {
            Ok(MergeOutcome::NoData) => {
                warn!(%month, "No OHLCV data for month, merge skipped");
                StepStatus::Done(MergeOutcome::NoData)
            }
            Ok(outcome) => StepStatus::Done(outcome),
            Err(e) => {
                warn!(%month, error = %e, "Monthly merge failed");
                StepStatus::Failed(e.to_string())
            }
        }
    }

    fn run_pack(&self, month: &MonthKey) -> StepStatus<PackOutcome> {
        match pack_month(&self.layout, month) {
            Ok(PackOutcome::NoData) => {
                warn!(%month, "No day folders for month, pack skipped");
                StepStatus::Done(PackOutcome::NoData)
            }
            Ok(outcome) => StepStatus::Done(outcome),
            Err(e) => {
                // Best effort: a half-written archive is left in place and
                // counts as done on the next run.
                warn!(%month, error = %e, "Monthly pack failed");
                StepStatus::Failed(e.to_string())
            }
        }
    }

    /// Create the compatibility symlink pointing at the lake root.
    ///
    /// Failure is deliberately ignored (the link is a convenience for
    /// older tooling and usually needs permissions we may not have).
    fn ensure_compat_link(&self) {
        let Some(link) = &self.config.compat_link else {
            return;
        };
        if link.symlink_metadata().is_ok() {
            return;
        }
        #[cfg(unix)]
        match std::os::unix::fs::symlink(&self.config.lake_root, link) {
            Ok(()) => debug!(link = %link.display(), "Created compatibility symlink"),
            Err(e) => debug!(link = %link.display(), error = %e, "Compatibility symlink not created"),
        }
    }
}
