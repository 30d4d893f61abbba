//! Monthly OHLCV merge.
//!
//! Concatenates each day folder's `ohlcv.jsonl` into one monthly file.
//! JSON Lines concatenation needs no framing beyond the newlines the
//! per-day files already carry, so this is a byte-level copy. Day
//! folders are sorted first so the output is deterministic regardless
//! of directory enumeration order.

use crate::error::ExportResult;
use flate2::write::GzEncoder;
use flate2::Compression;
use lakeport_core::layout::OHLCV_FILE;
use lakeport_core::{CoreError, LakeLayout, MonthKey};
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use tracing::{debug, info};

/// Outcome of the monthly merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Monthly file written from this many day folders.
    Merged { days: usize, bytes: u64 },
    /// Target already exists with non-zero size; nothing done.
    SkippedExisting,
    /// No day folder for the month carries an OHLCV file.
    NoData,
}

/// Merge one month of per-day OHLCV files into the monthly artifact.
///
/// Idempotent: an existing non-empty target is never rewritten, even if
/// the lake has changed since it was produced.
pub fn merge_month(
    layout: &LakeLayout,
    month: &MonthKey,
    gzip: bool,
) -> ExportResult<MergeOutcome> {
    let target = layout.monthly_ohlcv_path(month, gzip);
    if is_nonempty_file(&target) {
        debug!(target = %target.display(), "Monthly OHLCV already exported, skipping merge");
        return Ok(MergeOutcome::SkippedExisting);
    }

    let days = match layout.month_day_dir_names(month) {
        Ok(days) => days,
        Err(CoreError::Io(ref e)) if e.kind() == ErrorKind::NotFound => {
            return Ok(MergeOutcome::NoData)
        }
        Err(e) => return Err(e.into()),
    };

    let with_ohlcv: Vec<&String> = days
        .iter()
        .filter(|d| layout.day_dir(d).join(OHLCV_FILE).is_file())
        .collect();

    if with_ohlcv.is_empty() {
        return Ok(MergeOutcome::NoData);
    }

    let file = File::create(&target)?;
    let bytes = if gzip {
        let mut enc = GzEncoder::new(BufWriter::new(file), Compression::default());
        let bytes = copy_days(layout, &with_ohlcv, &mut enc)?;
        enc.finish()?.flush()?;
        bytes
    } else {
        let mut out = BufWriter::new(file);
        let bytes = copy_days(layout, &with_ohlcv, &mut out)?;
        out.flush()?;
        bytes
    };

    info!(
        target = %target.display(),
        days = with_ohlcv.len(),
        bytes,
        "Merged monthly OHLCV"
    );

    Ok(MergeOutcome::Merged {
        days: with_ohlcv.len(),
        bytes,
    })
}

fn copy_days(layout: &LakeLayout, days: &[&String], out: &mut impl Write) -> ExportResult<u64> {
    let mut total = 0u64;
    for day in days {
        let mut src = File::open(layout.day_dir(day).join(OHLCV_FILE))?;
        total += io::copy(&mut src, out)?;
    }
    Ok(total)
}

fn is_nonempty_file(path: &std::path::Path) -> bool {
    path.metadata().map(|m| m.len() > 0).unwrap_or(false)
}

/// Shared skip check used by merge and pack.
pub(crate) fn artifact_exists(path: &std::path::Path) -> bool {
    is_nonempty_file(path)
}
