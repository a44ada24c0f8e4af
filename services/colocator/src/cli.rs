//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

use track_loader::{SeasonFilter, TrackFilter, DEFAULT_SEASON};

#[derive(Parser, Debug)]
#[command(name = "colocator")]
#[command(about = "Colocate Argo float profiles with hurricane tracks", long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch profiles around each storm and write reports and maps
    Run(RunArgs),

    /// Write the cleaned, filtered track rows to CSV
    Extract(ExtractArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Track source and selection shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct TrackArgs {
    /// IBTrACS CSV file
    #[arg(long, env = "IBTRACS_CSV", default_value = "ibtracs.ALL.list.v04r01.csv")]
    pub tracks: PathBuf,

    /// Season (year) to process
    #[arg(long, default_value_t = DEFAULT_SEASON, conflicts_with = "all_seasons")]
    pub season: i32,

    /// Process every season in the file
    #[arg(long)]
    pub all_seasons: bool,

    /// Storm name to keep (repeatable; default keeps all)
    #[arg(long = "storm", value_name = "NAME")]
    pub storms: Vec<String>,
}

impl TrackArgs {
    pub fn filter(&self) -> TrackFilter {
        let season = if self.all_seasons {
            SeasonFilter::All
        } else {
            SeasonFilter::Single(self.season)
        };
        TrackFilter {
            season,
            storms: None,
        }
        .with_storms(&self.storms)
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub tracks: TrackArgs,

    /// YAML run configuration (windows, paddings, ERDDAP settings)
    #[arg(long, env = "COLOCATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for reports, maps and summary.json
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Serve profiles from a local ERDDAP-format CSV instead of ERDDAP
    #[arg(long)]
    pub profiles_csv: Option<PathBuf>,

    /// ERDDAP tabledap dataset URL
    #[arg(long, env = "ERDDAP_URL")]
    pub erddap_url: Option<String>,

    /// Maximum point fetches in flight per storm
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Skip map rendering
    #[arg(long)]
    pub no_map: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub tracks: TrackArgs,

    /// Output CSV (default: ibtracs_<season>_cleaned.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExtractArgs {
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None if self.tracks.all_seasons => PathBuf::from("ibtracs_all_cleaned.csv"),
            None => PathBuf::from(format!("ibtracs_{}_cleaned.csv", self.tracks.season)),
        }
    }
}

/// Parse a log level name; unknown names fall back to INFO.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
