//! Static HTTP file server for lakeport export artifacts.
//!
//! Serves the export directory over plain HTTP: the generated
//! `index.html` at `/`, artifact downloads by name, and a `/health`
//! probe. This is the terminal step of the lakeport pipeline; the
//! process lives as long as the server does.

mod config;
mod server;

pub use config::ServerConfig;
pub use server::{create_router, run_server, ServerError};
