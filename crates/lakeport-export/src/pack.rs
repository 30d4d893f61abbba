//! Monthly endpoint-file archive.
//!
//! Packs every day folder of the month into one `.tgz`, entries rooted
//! at the day-folder names so extraction reproduces them at the top
//! level. The archive carries all endpoint files, not just OHLCV, and
//! so is gated only on a day folder existing for the month. Archiving
//! is best effort: the pipeline logs a failure and keeps going.

use crate::error::ExportResult;
use crate::merge::artifact_exists;
use flate2::write::GzEncoder;
use flate2::Compression;
use lakeport_core::{CoreError, LakeLayout, MonthKey};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use tracing::{debug, info};

/// Outcome of the monthly pack step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackOutcome {
    /// Archive written from this many day folders.
    Packed { days: usize },
    /// Target already exists with non-zero size; nothing done.
    SkippedExisting,
    /// No day folder exists for the month.
    NoData,
}

/// Archive one month of day folders into the monthly `.tgz` artifact.
///
/// Idempotent: an existing non-empty target is never rewritten. A run
/// that errors midway may leave a partial archive behind; by the
/// cache-once contract that partial file counts as done on the next run.
pub fn pack_month(layout: &LakeLayout, month: &MonthKey) -> ExportResult<PackOutcome> {
    let target = layout.monthly_archive_path(month);
    if artifact_exists(&target) {
        debug!(target = %target.display(), "Monthly archive already exported, skipping pack");
        return Ok(PackOutcome::SkippedExisting);
    }

    let days = match layout.month_day_dir_names(month) {
        Ok(days) => days,
        Err(CoreError::Io(ref e)) if e.kind() == ErrorKind::NotFound => {
            return Ok(PackOutcome::NoData)
        }
        Err(e) => return Err(e.into()),
    };

    if days.is_empty() {
        return Ok(PackOutcome::NoData);
    }

    let file = File::create(&target)?;
    let enc = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(enc);

    for day in &days {
        builder.append_dir_all(day, layout.day_dir(day))?;
    }

    let enc = builder.into_inner()?;
    enc.finish()?.flush()?;

    info!(
        target = %target.display(),
        days = days.len(),
        "Packed monthly archive"
    );

    Ok(PackOutcome::Packed { days: days.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use lakeport_core::ExportConfig;
    use std::collections::BTreeMap;
    use std::io::Read;
    use tempfile::TempDir;

    fn make_layout(lake: &std::path::Path, export: &std::path::Path) -> LakeLayout {
        let config = ExportConfig {
            symbol: "BTCUSDT_PERP.A".to_string(),
            interval: "1min".to_string(),
            lake_root: lake.to_path_buf(),
            export_root: export.to_path_buf(),
            ..ExportConfig::default()
        };
        LakeLayout::from_config(&config)
    }

    fn seed_day_file(layout: &LakeLayout, day: &str, file: &str, content: &str) {
        let dir = layout.day_dir(day);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(file), content).unwrap();
    }

    /// Read back every regular-file entry of the archive: path -> bytes.
    fn archive_entries(path: &std::path::Path) -> BTreeMap<String, String> {
        let file = File::open(path).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut out = BTreeMap::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            out.insert(name, content);
        }
        out
    }

    #[test]
    fn test_pack_round_trips_day_folders() {
        let lake = TempDir::new().unwrap();
        let export = TempDir::new().unwrap();
        let layout = make_layout(lake.path(), export.path());
        let month = MonthKey::parse("2024-05").unwrap();

        seed_day_file(&layout, "2024-05-01", "ohlcv.jsonl", "{\"c\":1}\n");
        seed_day_file(&layout, "2024-05-01", "funding.jsonl", "{\"f\":1}\n");
        seed_day_file(&layout, "2024-05-02", "ohlcv.jsonl", "{\"c\":2}\n");
        // Different month must not be packed
        seed_day_file(&layout, "2024-04-30", "ohlcv.jsonl", "{\"c\":0}\n");

        let outcome = pack_month(&layout, &month).unwrap();
        assert_eq!(outcome, PackOutcome::Packed { days: 2 });

        let entries = archive_entries(&layout.monthly_archive_path(&month));
        let names: Vec<&String> = entries.keys().collect();
        assert_eq!(
            names,
            vec![
                "2024-05-01/funding.jsonl",
                "2024-05-01/ohlcv.jsonl",
                "2024-05-02/ohlcv.jsonl"
            ]
        );
        assert_eq!(entries["2024-05-01/ohlcv.jsonl"], "{\"c\":1}\n");
    }

    #[test]
    fn test_pack_runs_without_ohlcv() {
        let lake = TempDir::new().unwrap();
        let export = TempDir::new().unwrap();
        let layout = make_layout(lake.path(), export.path());
        let month = MonthKey::parse("2024-05").unwrap();

        // Endpoint data only; archive must still be built
        seed_day_file(&layout, "2024-05-01", "liquidations.jsonl", "{}\n");

        assert_eq!(
            pack_month(&layout, &month).unwrap(),
            PackOutcome::Packed { days: 1 }
        );
    }

    #[test]
    fn test_pack_is_idempotent() {
        let lake = TempDir::new().unwrap();
        let export = TempDir::new().unwrap();
        let layout = make_layout(lake.path(), export.path());
        let month = MonthKey::parse("2024-05").unwrap();

        seed_day_file(&layout, "2024-05-01", "ohlcv.jsonl", "x\n");

        assert_eq!(
            pack_month(&layout, &month).unwrap(),
            PackOutcome::Packed { days: 1 }
        );
        assert_eq!(
            pack_month(&layout, &month).unwrap(),
            PackOutcome::SkippedExisting
        );
    }

    #[test]
    fn test_no_day_folders_is_no_data() {
        let lake = TempDir::new().unwrap();
        let export = TempDir::new().unwrap();
        let layout = make_layout(lake.path(), export.path());
        let month = MonthKey::parse("2024-05").unwrap();

        // Source dir missing entirely
        assert_eq!(pack_month(&layout, &month).unwrap(), PackOutcome::NoData);

        // Source dir present, only other months
        std::fs::create_dir_all(layout.day_dir("2024-04-30")).unwrap();
        assert_eq!(pack_month(&layout, &month).unwrap(), PackOutcome::NoData);
        assert!(!layout.monthly_archive_path(&month).exists());
    }
}
