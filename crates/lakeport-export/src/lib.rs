//! Monthly export pipeline for the lakeport data lake.
//!
//! Turns day-partitioned lake data into flat, browsable export artifacts:
//! - `detect`: newest-month auto-detection
//! - `merge`: monthly OHLCV concatenation (idempotent)
//! - `pack`: monthly endpoint-file archive (idempotent, best effort)
//! - `snapshots`: per-day raw snapshot export
//! - `index`: HTML listing of the export directory
//! - `pipeline`: the linear run that ties the steps together

pub mod detect;
pub mod error;
pub mod index;
pub mod merge;
pub mod pack;
pub mod pipeline;
pub mod snapshots;

pub use detect::latest_month;
pub use error::{ExportError, ExportResult};
pub use index::write_index;
pub use merge::{merge_month, MergeOutcome};
pub use pack::{pack_month, PackOutcome};
pub use pipeline::{ExportPipeline, ExportReport, StepStatus};
pub use snapshots::export_day_snapshots;
