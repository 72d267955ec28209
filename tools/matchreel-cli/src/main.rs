//! MatchReel CLI — Command-line interface for playlist inspection and
//! sequencing dry-runs.
//!
//! Usage:
//!   matchreel validate <PLAYLIST>   Validate a playlist file
//!   matchreel info <PLAYLIST>       Show playlist information
//!   matchreel resolve <PLAYLIST>    Compute per-clip seek windows
//!   matchreel simulate <PLAYLIST>   Dry-run the playback sequence
//!   matchreel init <NAME>           Create a sample playlist
//!   matchreel config                Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "matchreel",
    about = "Curate, trim, and sequence sports highlight clips",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a playlist file
    Validate {
        /// Path to the playlist JSON
        path: PathBuf,
    },

    /// Show playlist information
    Info {
        /// Path to the playlist JSON
        path: PathBuf,
    },

    /// Compute the resolved seek window for every clip
    Resolve {
        /// Path to the playlist JSON
        path: PathBuf,

        /// Pre-roll buffer before each event (seconds)
        #[arg(long, default_value = "3.0")]
        pre_roll: f64,

        /// Fixed extraction length when no trim is saved (seconds)
        #[arg(long, default_value = "8.0")]
        clip_secs: f64,

        /// Post-roll after the event point, overriding the fixed length
        #[arg(long)]
        post_roll: Option<f64>,
    },

    /// Dry-run the playback sequence and print the state trace
    Simulate {
        /// Path to the playlist JSON
        path: PathBuf,

        /// Play clips back to back, without generated overlays
        #[arg(long)]
        no_overlays: bool,

        /// Enable loop mode (the trace is truncated after one pass cap)
        #[arg(long = "loop")]
        loop_enabled: bool,
    },

    /// Create a sample playlist to start from
    Init {
        /// Playlist name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write the shown configuration to the standard location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    matchreel_common::logging::init_logging(&matchreel_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Resolve {
            path,
            pre_roll,
            clip_secs,
            post_roll,
        } => commands::resolve::run(path, pre_roll, clip_secs, post_roll),
        Commands::Simulate {
            path,
            no_overlays,
            loop_enabled,
        } => commands::simulate::run(path, !no_overlays, loop_enabled),
        Commands::Init { name, output } => commands::init::run(name, output),
        Commands::Config { write } => commands::config::run(write),
    }
}
