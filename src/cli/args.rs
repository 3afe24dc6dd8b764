//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Keep image dimensions and shared snippets in sync across static HTML pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Site root directory (default: current directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path, relative to the site root (default: pagesync.toml)
    #[arg(short = 'C', long, global = true, default_value = "pagesync.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print per-document details and skipped tags
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert images to WebP, then sync <img> width/height with the image files
    #[command(visible_alias = "d")]
    Dims {
        /// Skip WebP conversion and only update HTML dimensions
        #[arg(long)]
        html_only: bool,
    },

    /// Replace every scroll-to-top button with the canonical markup
    #[command(visible_alias = "s")]
    Snippet,
}
