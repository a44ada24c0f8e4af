//! Storm / Argo colocation CLI.
//!
//! For every storm selected from an IBTrACS file:
//! - Fetches Argo profiles around each track point (ERDDAP or a local CSV)
//! - Splits them into Before / During / After the storm's passage
//! - Writes a text report, a PNG map and a run-level summary.json

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use colocator::cli::{parse_level, Cli, Commands, LogFormat};
use colocator::commands;

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(parse_level(log_level))
        .with_target(true);

    match format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    match cli.command {
        Commands::Run(args) => {
            info!(tracks = %args.tracks.tracks.display(), "Starting storm colocation");
            commands::run(args).await?;
        }
        Commands::Extract(args) => {
            commands::extract(args)?;
        }
    }

    Ok(())
}
