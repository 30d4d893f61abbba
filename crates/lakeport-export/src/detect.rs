//! Newest-month auto-detection.

use lakeport_core::{CoreError, LakeLayout, MonthKey};
use std::collections::BTreeSet;
use std::io::ErrorKind;
use tracing::warn;

/// Find the newest month present in the lake for this symbol/interval.
///
/// Day-folder names are mapped to their `YYYY-MM` prefix and the
/// lexicographic maximum wins (correct for zero-padded keys). Returns
/// `None` when the source directory is missing or holds no day folders;
/// both cases are warnings, not errors, so the pipeline can still serve
/// whatever was exported previously.
pub fn latest_month(layout: &LakeLayout) -> Option<MonthKey> {
    let names = match layout.day_dir_names() {
        Ok(names) => names,
        Err(CoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            warn!(source_dir = %layout.source_dir().display(), "Source directory missing, cannot detect month");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Failed to scan source directory");
            return None;
        }
    };

    let months: BTreeSet<MonthKey> = names
        .iter()
        .filter_map(|n| MonthKey::from_day_dir_name(n))
        .collect();

    months.into_iter().next_back()
}
