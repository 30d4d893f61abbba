//! Month keys for grouping day partitions into export artifacts.
//!
//! Day folders in the lake are named `YYYY-MM-DD` (sometimes with a
//! suffix, e.g. `2024-05-01.partial`). The month key is the `YYYY-MM`
//! prefix. Lexicographic order is the intended ordering: keys are
//! zero-padded, so string comparison sorts them chronologically.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `YYYY-MM` month key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse a month key from a `YYYY-MM` string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let mut fields = s.split('-');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(y), Some(m), None) if !y.is_empty() && !m.is_empty() => {
                Ok(Self(format!("{y}-{m}")))
            }
            _ => Err(CoreError::InvalidMonthKey(s.to_string())),
        }
    }

    /// Wrap an explicitly configured month string without validation.
    ///
    /// Operator overrides are passed through as-is: a malformed value
    /// simply matches no day folders downstream and surfaces as a
    /// missing-data warning, which is the documented behavior.
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Extract the month key from a day-folder name.
    ///
    /// Only names with at least three hyphen-separated fields qualify
    /// (i.e. names that look like `YYYY-MM-DD...`). Returns `None` for
    /// anything else, so stray files in the interval directory are
    /// ignored rather than misparsed.
    pub fn from_day_dir_name(name: &str) -> Option<Self> {
        let fields: Vec<&str> = name.split('-').collect();
        if fields.len() < 3 || fields[0].is_empty() || fields[1].is_empty() {
            return None;
        }
        Some(Self(format!("{}-{}", fields[0], fields[1])))
    }

    /// The `YYYY-MM-` prefix shared by every day folder of this month.
    pub fn day_prefix(&self) -> String {
        format!("{}-", self.0)
    }

    /// Whether a day-folder name belongs to this month.
    pub fn contains_day(&self, day_dir_name: &str) -> bool {
        day_dir_name.starts_with(&self.day_prefix())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
