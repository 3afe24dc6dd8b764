//! pagesync - keep `<img>` dimensions and shared snippets in sync across
//! hand-maintained static HTML pages.

mod cli;
mod config;
mod core;
mod document;
mod image;
mod logger;
mod sync;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SyncConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any file is touched)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SyncConfig::load(&cli)?;
    debug!("config"; "root {}", config.get_root().display());

    match &cli.command {
        Commands::Dims { html_only } => cli::dims::run_dims(&config, *html_only),
        Commands::Snippet => cli::snippet::run_snippet(&config),
    }
}
