//! Subcommand implementations.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use colocation::StormProcessor;
use profile_fetcher::{CsvFileFetcher, ErddapFetcher, ProfileFetcher};
use report::{ArtifactWriter, RunSummary, SUMMARY_FILENAME};
use track_loader::{load_rows, load_tracks, write_rows};

use crate::cli::{ExtractArgs, RunArgs};
use crate::config::RunConfig;
use crate::runner::Runner;

/// Resolve configuration layers: YAML file, then CLI overrides.
pub fn resolve_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = RunConfig::load_or_default(args.config.as_deref())?;
    if let Some(url) = &args.erddap_url {
        config.erddap.base_url = url.clone();
    }
    if let Some(max) = args.max_concurrent {
        config.max_concurrent_fetches = max;
    }
    if args.no_map {
        config.map = false;
    }
    Ok(config)
}

fn build_fetcher(args: &RunArgs, config: &RunConfig) -> Result<Arc<dyn ProfileFetcher>> {
    match &args.profiles_csv {
        Some(path) => {
            let fetcher = CsvFileFetcher::open(path)
                .with_context(|| format!("Failed to load profile file: {}", path.display()))?;
            Ok(Arc::new(fetcher))
        }
        None => {
            let fetcher = ErddapFetcher::new(config.erddap())
                .context("Failed to create ERDDAP client")?;
            Ok(Arc::new(fetcher))
        }
    }
}

/// `colocator run`
pub async fn run(args: RunArgs) -> Result<RunSummary> {
    let config = resolve_config(&args)?;
    let filter = args.tracks.filter();

    let tracks = load_tracks(&args.tracks.tracks, &filter).with_context(|| {
        format!("Failed to load storm tracks from {}", args.tracks.tracks.display())
    })?;

    let fetcher = build_fetcher(&args, &config)?;
    let source = fetcher.name().to_string();
    let processor = StormProcessor::new(fetcher, config.matching()?)
        .context("Invalid matching configuration")?;
    let writer = ArtifactWriter::new(&args.output_dir).with_map(config.map);

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.output_dir.display())
    })?;

    let mut summary = RunSummary::new(filter.describe(), source);
    Runner::new(processor, writer).run(&tracks, &mut summary).await;

    let summary_path = args.output_dir.join(SUMMARY_FILENAME);
    summary
        .write(&summary_path)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "Wrote run summary");

    Ok(summary)
}

/// `colocator extract`
pub fn extract(args: ExtractArgs) -> Result<usize> {
    let filter = args.tracks.filter();
    let rows = load_rows(&args.tracks.tracks, &filter).with_context(|| {
        format!("Failed to load storm tracks from {}", args.tracks.tracks.display())
    })?;

    let output = args.output_path();
    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_rows(BufWriter::new(file), &rows.rows)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        rows = rows.rows.len(),
        rejected = rows.report.rows_rejected(),
        path = %output.display(),
        "Extracted track rows"
    );
    Ok(rows.rows.len())
}
