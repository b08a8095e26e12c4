mod console;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use renamarr_core::{ReportLevel, RunConfig};
use renamarr_metadata::Manager;
use renamarr_renamer::{Interaction, Orchestrator, Outcome};
use renamarr_scanner::{group_by_parent, scan_dir};
use tracing_subscriber::EnvFilter;

use crate::console::Console;

#[derive(Parser, Debug)]
#[command(
    name = "renamarr",
    version,
    about = "Rename movies and TV episodes into a Kodi-compatible layout"
)]
struct Cli {
    /// TheTVDB v4 API key
    #[arg(long, env = "TVDB_API_KEY")]
    tvdb_api_key: Option<String>,

    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY")]
    tmdb_api_key: Option<String>,

    /// Directory scanned for movies
    #[arg(long, env = "MOVIES_DIR")]
    movies_dir: Option<PathBuf>,

    /// Destination for renamed movies; defaults to renaming in place
    #[arg(long, env = "MOVIES_OUT_DIR")]
    movies_out_dir: Option<PathBuf>,

    /// Directory scanned for TV series
    #[arg(long, env = "SERIES_DIR")]
    series_dir: Option<PathBuf>,

    /// Destination for renamed series; defaults to renaming in place
    #[arg(long, env = "SERIES_OUT_DIR")]
    series_out_dir: Option<PathBuf>,

    /// Report every rename without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Take the top-ranked match without prompting
    #[arg(long)]
    auto: bool,
}

#[derive(Default)]
struct Summary {
    renamed: u32,
    skipped: u32,
    failed: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.tvdb_api_key.is_none() && cli.tmdb_api_key.is_none() {
        bail!("at least one API key is required (TVDB_API_KEY or TMDB_API_KEY)");
    }

    let config = RunConfig {
        dry_run: cli.dry_run,
        auto: cli.auto,
        movies_dir: cli.movies_dir,
        movies_out_dir: cli.movies_out_dir,
        series_dir: cli.series_dir,
        series_out_dir: cli.series_out_dir,
    };
    if !config.has_input() {
        bail!("at least one input directory is required (MOVIES_DIR or SERIES_DIR)");
    }

    let manager = Manager::new(cli.tvdb_api_key, cli.tmdb_api_key)
        .await
        .context("initializing metadata backends")?;
    let console = Console::new();
    let orchestrator = Orchestrator::new(&manager, &console, &config);

    let mut summary = Summary::default();
    if let Some(dir) = &config.movies_dir {
        run_dir(&orchestrator, &console, &config, dir, &mut summary).await;
    }
    if let Some(dir) = &config.series_dir {
        // Same directory for both roles would process everything twice.
        if config.movies_dir.as_deref() != Some(dir.as_path()) {
            run_dir(&orchestrator, &console, &config, dir, &mut summary).await;
        }
    }

    console.report(
        ReportLevel::Success,
        &format!(
            "done: {} renamed, {} skipped, {} failed",
            summary.renamed, summary.skipped, summary.failed
        ),
    );
    Ok(())
}

/// Scan one input directory and process everything found, movies first,
/// then series batches. Per-item failures are reported and counted; the
/// run always continues to the next item.
async fn run_dir(
    orchestrator: &Orchestrator<'_>,
    console: &Console,
    config: &RunConfig,
    dir: &Path,
    summary: &mut Summary,
) {
    let items = scan_dir(dir);
    let (episodes, movies): (Vec<_>, Vec<_>) = items.into_iter().partition(|i| i.is_episode());

    for item in &movies {
        if !config.auto {
            console.clear_screen();
        }
        match orchestrator.process_movie(item).await {
            Ok(Outcome::Renamed) => summary.renamed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                summary.failed += 1;
                console.report(ReportLevel::Error, &format!("{}: {e}", item.raw_name));
            }
        }
    }

    for batch in group_by_parent(episodes) {
        if !config.auto {
            console.clear_screen();
        }
        match orchestrator.process_series_batch(&batch).await {
            Ok(Outcome::Renamed) => summary.renamed += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                summary.failed += 1;
                console.report(ReportLevel::Error, &format!("{}: {e}", batch.parent_name));
            }
        }
    }
}
