//! Core domain types for the lakeport exporter.
//!
//! This crate provides the types shared by the export pipeline and server:
//! - `MonthKey`: the `YYYY-MM` grouping key for export artifacts
//! - `LakeLayout`: path construction for the day-partitioned data lake
//! - `ExportConfig`: exporter configuration with environment overrides

pub mod config;
pub mod error;
pub mod layout;
pub mod month;

pub use config::ExportConfig;
pub use error::{CoreError, CoreResult};
pub use layout::LakeLayout;
pub use month::MonthKey;
