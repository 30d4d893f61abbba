//! Export pipeline error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Core error: {0}")]
    Core(#[from] lakeport_core::CoreError),

    #[error("Day folder not found: {0}")]
    DayNotFound(String),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;
