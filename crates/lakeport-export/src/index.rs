//! HTML index generation for the export directory.
//!
//! Regenerated on every run: lists whatever files are physically present
//! in the export directory, sorted, one relative hyperlink per entry.
//! The index ends up listing itself on later runs, which is harmless.

use crate::error::ExportResult;
use lakeport_core::LakeLayout;
use std::fmt::Write as _;
use tracing::info;

/// Write `index.html` into the export directory.
///
/// Returns the number of entries listed.
pub fn write_index(layout: &LakeLayout, port: u16) -> ExportResult<usize> {
    let mut names: Vec<String> = std::fs::read_dir(layout.export_root())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let mut html = String::new();
    html.push_str("<!doctype html>\n<html>\n<head><meta charset=\"utf-8\">");
    let _ = write!(
        html,
        "<title>{} {} exports</title></head>\n<body>\n",
        layout.symbol(),
        layout.interval()
    );
    let _ = write!(
        html,
        "<h1>{} {} exports (port {})</h1>\n<ul>\n",
        layout.symbol(),
        layout.interval(),
        port
    );
    for name in &names {
        let _ = writeln!(html, "<li><a href=\"{name}\">{name}</a></li>");
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    std::fs::write(layout.index_path(), html)?;

    info!(entries = names.len(), "Wrote export index");
    Ok(names.len())
}
