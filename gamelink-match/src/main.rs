//! gamelink-match - library to catalog linker
//!
//! Loads a library export, resolves every visible entry against the
//! catalogs given on the command line, logs a per-source report and writes
//! `{results, reports, summary}` as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use gamelink_common::config::ConfigResolver;
use gamelink_common::logging::init_logging;
use gamelink_match::ingest::load_library_csv;
use gamelink_match::{
    build_reports, AppConfig, FixtureProvider, MatchReport, MatchResult, ResolutionEngine,
    RunSummary, Source,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "gamelink-match")]
#[command(about = "Link a game library to HLTB and IGDB catalog records")]
#[command(version)]
struct Args {
    /// Library export (Playnite CSV)
    #[arg(short, long, value_name = "CSV")]
    library: PathBuf,

    /// HLTB candidates, as a JSON fixture
    #[arg(long, value_name = "JSON")]
    hltb: Option<PathBuf>,

    /// IGDB candidates, as a JSON fixture
    #[arg(long, value_name = "JSON")]
    igdb: Option<PathBuf>,

    /// Config file (takes priority over GAMELINK_CONFIG and the user config)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Cancel outstanding lookups after this many seconds
    #[arg(long, env = "GAMELINK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    results: &'a [MatchResult],
    reports: &'a BTreeMap<Source, MatchReport>,
    summary: RunSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_source = ConfigResolver::new()
        .with_cli_path(args.config.clone())
        .resolve();
    let mut config = AppConfig::load(&config_source).context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting gamelink-match v{}", env!("CARGO_PKG_VERSION"));
    info!(config = ?config_source, "Configuration resolved");

    if let Some(secs) = args.timeout_secs {
        config.matching.run_timeout_secs = Some(secs);
    }

    let mut engine = ResolutionEngine::new(config.matching.clone())?;

    let library = load_library_csv(&args.library, engine.normalizer())
        .with_context(|| format!("Failed to load library {}", args.library.display()))?;

    let mut sources = Vec::new();
    for (source, path) in [(Source::Hltb, &args.hltb), (Source::Igdb, &args.igdb)] {
        if let Some(path) = path {
            let provider = FixtureProvider::from_path(source, path, engine.normalizer())
                .with_context(|| format!("Failed to load {} fixture {}", source, path.display()))?;
            info!(source = %source, queries = provider.query_count(), "Candidate fixture loaded");
            engine.register_provider(Arc::new(provider));
            sources.push(source);
        }
    }

    if sources.is_empty() {
        anyhow::bail!("No catalog given; pass --hltb and/or --igdb");
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling outstanding lookups");
            interrupt.cancel();
        }
    });

    let outcome = engine.resolve(&library.entries, &sources, &cancel).await?;

    let reports = build_reports(&sources, &outcome.results, engine.config());
    for report in reports.values() {
        report.log_summary();
    }

    let output = RunOutput {
        results: &outcome.results,
        reports: &reports,
        summary: outcome.summary,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Results written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
