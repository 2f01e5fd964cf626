//! Check-the-check runner
//!
//! Reads 8-line boards from stdin (or `--input <path>`), prints one
//! verdict per game until an all-empty board or end of input.

mod config;

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Context;
use check_core::game_loop::{BoardSource, GameLoop, VerdictSink};
use check_core::io::{JsonLinesSink, LineBoardSource, TextSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, RunnerConfig};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only verdicts
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = RunnerConfig::load()?;
    info!(?config, "Configuration loaded");

    let reader: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let source = LineBoardSource::new(reader);
    let stdout = io::stdout().lock();

    match config.output {
        OutputFormat::Text => run(source, TextSink::new(stdout), &config),
        OutputFormat::Json => run(source, JsonLinesSink::new(stdout), &config),
    }
}

fn run<S, K>(source: S, sink: K, config: &RunnerConfig) -> anyhow::Result<()>
where
    S: BoardSource,
    K: VerdictSink,
{
    let summary = GameLoop::new(source, sink, config.options).run()?;
    info!(games = summary.games, skipped = summary.skipped, "Done");
    Ok(())
}
