mod cli;
mod config;
mod engine;
mod error;
mod helpers;
mod runner;
mod sources;

use std::io;

use cli::Cli;
use config::Config;
use helpers::{
    dest_dir::{ensure_dir, FolderState},
    fetch::fetch_listing,
};
use runner::{console_confirm, run_batch, ProcessExecutor};
use tracing::{debug, error, info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter::Builder as TracingFilterBuilder, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match dotenvy::dotenv() {
        Err(e) if e.not_found() => {}
        Ok(_) => {}
        Err(e) => {
            panic!("Failed to load .env file: {}", e);
        }
    }

    init_log();

    let cli = Cli::parse_or_exit();

    let mut config = Config::from_env();
    if cli.save_as_title {
        config.save_as_title = true;
    }
    debug!(?config, "Loaded config");

    if let Err(e) = run(&cli, &config).await {
        error!(?e, "Run failed");
        eprintln!("{e:#}");
        std::process::exit(error::exit_code_for(&e));
    }
}

#[tracing::instrument(skip_all, fields(url = cli.url.as_str()))]
async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let listing = sources::resolve(&cli.url)?;
    info!(source = listing.source.name(), folder = %listing.folder, "Scraping listing");

    let body = fetch_listing(&listing.url, &config.user_agent).await?;
    let candidates = listing.source.candidates(&body)?;
    trace!(
        candidates = candidates.len(),
        rules = listing.source.rules().rules().len(),
        "Candidates extracted"
    );

    match ensure_dir(listing.folder.as_path())? {
        FolderState::Created => println!("Creating new folder: {}", listing.folder),
        FolderState::Existing => println!("Using existing folder: {}", listing.folder),
        FolderState::Unusable => println!("Unable to use folder: {}", listing.folder),
    }

    let commands = engine::scrape(listing.source.rules(), config, &listing.folder, candidates);

    let confirm = |commands: &engine::ScrapeResult| cli.yes || console_confirm(commands);
    let ran = run_batch(&commands, confirm, &ProcessExecutor, &mut io::stdout()).await?;

    info!(ran, "Done");

    Ok(())
}

fn init_log() {
    tracing_subscriber::fmt()
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_env_filter(
            TracingFilterBuilder::default()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish()
        .init();
}
