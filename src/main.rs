//! Strictly Minesweeper - terminal front end
//!
//! Resolves the configuration, then hands the terminal to the game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use strictly_minesweeper::cli::Cli;
use strictly_minesweeper::{ConfigFile, GameConfig, tui};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "strictly_minesweeper.log";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => match ConfigFile::from_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        },
        None => None,
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| file.as_ref().and_then(|f| f.log_file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    init_logging(&log_file)?;

    let config = match GameConfig::resolve(file.as_ref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, file = e.file, line = e.line, "Invalid configuration");
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(?config, "Configuration resolved");

    let termination = tui::run_tui(config).await?;
    println!("{}", termination.message());

    Ok(ExitCode::SUCCESS)
}

/// Logs to a file so output never interferes with the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
