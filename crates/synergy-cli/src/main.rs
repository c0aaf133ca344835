//! Command-line front end for the synergy optimizer.
//!
//! Loads the engine configuration and the saved settings, runs one
//! subcommand against the restored session and prints the outcome.
//!
//! # Modules
//!
//! - [`cli`] -- Argument definitions
//! - [`commands`] -- Subcommand handlers
//! - [`error`] -- Error types
//! - [`render`] -- Plain-text tables

mod cli;
mod commands;
mod error;
mod render;

use std::path::Path;

use clap::Parser;
use synergy_engine::{EngineConfig, Session};
use synergy_store::SettingsStore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::error::CliError;

/// Configuration file picked up from the working directory.
const LOCAL_CONFIG_FILE: &str = "synergy-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration or settings cannot be loaded, an
/// input is rejected, or the settings cannot be saved.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(args)?;
    println!("{output}");
    Ok(())
}

/// Bootstrap the session and execute the requested command.
fn run(args: Args) -> Result<String, CliError> {
    let config = load_config(args.config.as_deref())?;
    let store = match args.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::default_location()?,
    };

    // A broken settings file must not block writing a fresh one.
    let saved = if matches!(args.command, Command::Init { .. }) {
        None
    } else {
        store.load()?
    };
    let mut session = match saved {
        Some(state) => Session::from_persisted(&state, config)?,
        None => Session::new(config)?,
    };
    info!(
        settings = %store.path().display(),
        total_units = session.total_units(),
        "session ready"
    );

    let output = commands::execute(args.command, &mut session, &store)?;
    output.render(&session, args.json)
}

/// Load `path`, else the local config file if present, else defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let local = Path::new(LOCAL_CONFIG_FILE);
    let config = match path {
        Some(path) => EngineConfig::from_file(path)?,
        None if local.exists() => EngineConfig::from_file(local)?,
        None => EngineConfig::parse("")?,
    };
    debug!(
        max_stage = config.defaults.max_stage,
        hours = config.display.hours,
        "configuration loaded"
    );
    Ok(config)
}
