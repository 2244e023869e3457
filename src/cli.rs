use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bingwall main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download today's wallpaper and set it as the desktop background
    Fetch(FetchArgs),

    /// Apply an already-saved image as the desktop background
    Apply {
        /// Path to the image file
        path: PathBuf,
    },

    /// Show the resolved configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Override the image endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Override the base data directory
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Keep one file per calendar day (fails if today's file exists)
    #[arg(long, conflicts_with = "unique")]
    pub daily: bool,

    /// Use a timestamped filename unique to this run
    #[arg(long)]
    pub unique: bool,

    /// Replace an existing same-day file instead of failing
    #[arg(long)]
    pub overwrite: bool,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Maximum number of download attempts
    #[arg(long)]
    pub retries: Option<u32>,

    /// Per-attempt timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Download and save only, without changing the desktop background
    #[arg(long)]
    pub no_set: bool,
}
