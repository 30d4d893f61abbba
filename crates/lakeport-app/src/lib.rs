//! Lakeport application: config loading, logging and wiring.
//!
//! The binary runs a strictly linear pipeline (configure → export →
//! index) and then blocks on the static file server over the export
//! directory.

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
