//! Lakeport - Data Lake Exporter and Export Browser - Entry Point
//!
//! Runs the monthly export pipeline (merge, pack, index) over the
//! day-partitioned lake, then serves the export directory over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lakeport_app::AppConfig;
use lakeport_core::LakeLayout;
use lakeport_export::{export_day_snapshots, ExportPipeline};
use std::path::PathBuf;
use tracing::info;

/// Lakeport data lake exporter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via LAKEPORT_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the export pipeline, then serve the export directory (default)
    Run,
    /// Merge one day's raw snapshot files into a JSON Lines file
    ExportDay {
        /// Day folder name, e.g. 2024-05-01
        #[arg(long)]
        date: String,
        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    lakeport_app::init_logging()?;

    info!("Starting lakeport v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(args.config.as_deref())?;
    info!(
        symbol = %config.export.symbol,
        interval = %config.export.interval,
        lake_root = %config.export.lake_root.display(),
        export_root = %config.export.export_root.display(),
        "Configuration loaded"
    );

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let pipeline = ExportPipeline::new(config.export.clone(), config.server.port);
            let report = pipeline.run()?;
            info!(?report, "Export pipeline finished");

            // Terminal step: the process lives as long as the server
            lakeport_server::run_server(config.export.export_root.clone(), config.server)
                .await?;
        }
        Command::ExportDay { date, out } => {
            let layout = LakeLayout::from_config(&config.export);
            let lines = export_day_snapshots(&layout.day_dir(&date), &out)?;
            info!(date = %date, out = %out.display(), lines, "Day export finished");
        }
    }

    Ok(())
}
