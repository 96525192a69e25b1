//! Photo-Ripple main entry point
//!
//! This is the command-line interface for the Photo-Ripple gallery downloader.

use anyhow::Context;
use clap::Parser;
use photo_ripple::config::load_config_or_default;
use photo_ripple::crawler::Coordinator;
use photo_ripple::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Photo-Ripple: download every photo of a gallery profile
///
/// Photo-Ripple walks a user's photo feed page by page, expands photo
/// series, and downloads each photo with a pool of concurrent workers.
/// Files that already exist are skipped, so re-running only fetches what
/// is missing.
#[derive(Parser, Debug)]
#[command(name = "photo-ripple")]
#[command(version = "1.0.0")]
#[command(about = "Download every photo of a gallery profile", long_about = None)]
struct Cli {
    /// Account name of the profile to download
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Suppress non-error output, including skip messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent download workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Directory to save photos in
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Scheme and host of the gallery site
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Walk the feed and list photos without downloading them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(workers) = cli.workers {
        config.download.workers = workers;
    }
    if let Some(dir) = &cli.output_dir {
        config.download.output_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(base_url) = cli.base_url {
        config.site.base_url = base_url;
    }
    photo_ripple::config::validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        tracing::info!("Dry run: photos will be listed, not downloaded");
    }
    tracing::info!(
        "Downloading '{}' from {} with {} workers into {}",
        cli.username,
        config.site.base(),
        config.download.workers,
        config.download.output_dir
    );

    let coordinator = Coordinator::new(config)?
        .with_quiet(cli.quiet)
        .with_dry_run(cli.dry_run);

    match coordinator.run(&cli.username).await {
        Ok(report) => {
            if !cli.quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Per-file failures stay visible
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("photo_ripple=info,warn"),
            1 => EnvFilter::new("photo_ripple=debug,info"),
            2 => EnvFilter::new("photo_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
