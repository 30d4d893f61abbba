//! Per-day raw snapshot export.
//!
//! Each day folder may hold raw per-timestamp snapshot files
//! (`<unix_ts>.json`). This step merges one day's snapshots into a
//! single JSON Lines file, one compact document per line, sorted by
//! filename so lines come out in capture order. Unreadable or malformed
//! snapshots are skipped with a warning rather than aborting the export.

use crate::error::{ExportError, ExportResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Merge every `*.json` snapshot in `day_dir` into `out` as JSON Lines.
///
/// Returns the number of lines written. A missing day folder is an
/// error: this feeds the `export-day` subcommand, where the caller named
/// the day explicitly.
pub fn export_day_snapshots(day_dir: &Path, out: &Path) -> ExportResult<usize> {
    if !day_dir.is_dir() {
        return Err(ExportError::DayNotFound(
            day_dir.to_string_lossy().into_owned(),
        ));
    }

    let mut names: Vec<String> = std::fs::read_dir(day_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".json"))
        .collect();
    names.sort();

    let mut writer = BufWriter::new(File::create(out)?);
    let mut written = 0usize;

    for name in &names {
        let path = day_dir.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable snapshot");
                continue;
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping malformed snapshot");
                continue;
            }
        };
        // to_string is the compact form; one document per line
        writeln!(writer, "{}", serde_json::to_string(&value)?)?;
        written += 1;
    }

    writer.flush()?;

    info!(
        day_dir = %day_dir.display(),
        out = %out.display(),
        lines = written,
        "Exported day snapshots"
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exports_sorted_compact_lines() {
        let day = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("day.jsonl");

        // Written out of order; filename sort restores capture order
        std::fs::write(day.path().join("1700000002.json"), "{\"t\": 2}").unwrap();
        std::fs::write(day.path().join("1700000001.json"), "{ \"t\" : 1 }").unwrap();
        // Non-json files are ignored
        std::fs::write(day.path().join("stream.jsonl"), "{}\n{}\n").unwrap();

        let written = export_day_snapshots(day.path(), &out).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content, "{\"t\":1}\n{\"t\":2}\n");
    }

    #[test]
    fn test_malformed_snapshot_is_skipped() {
        let day = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("day.jsonl");

        std::fs::write(day.path().join("1700000001.json"), "{\"ok\":true}").unwrap();
        std::fs::write(day.path().join("1700000002.json"), "{truncated").unwrap();

        let written = export_day_snapshots(day.path(), &out).unwrap();
        assert_eq!(written, 1);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "{\"ok\":true}\n"
        );
    }

    #[test]
    fn test_missing_day_folder_is_error() {
        let out_dir = TempDir::new().unwrap();
        let out = out_dir.path().join("day.jsonl");
        let missing = out_dir.path().join("2024-05-01");

        let err = export_day_snapshots(&missing, &out).unwrap_err();
        assert!(matches!(err, ExportError::DayNotFound(_)));
    }
}
