//! Groove CLI - Command-line interface for Groove Strata tracks
//!
//! This binary validates, expands and hashes track documents, and checks
//! whole track libraries.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;

use groove_cli::commands;

/// Groove - Bass and drum transcription tracks
#[derive(Parser)]
#[command(name = "groove")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a track file and report every error
    Validate {
        /// Path to the track JSON file
        file: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Expand patterns into flat, time-sorted bass and beat event lists
    Expand {
        /// Path to the track JSON file
        file: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print the canonical hash of a valid track
    Hash {
        /// Path to the track JSON file
        file: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every track listed in a library index
    Library {
        /// Library root directory containing index.json
        dir: String,

        /// Base URL the library is published under
        #[arg(long)]
        base_url: Option<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { file, json } => commands::validate::run(&file, json),
        Commands::Expand {
            file,
            output,
            compact,
        } => commands::expand::run(&file, output.as_deref(), compact),
        Commands::Hash { file, json } => commands::hash::run(&file, json),
        Commands::Library {
            dir,
            base_url,
            json,
        } => commands::library::run(&dir, base_url.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
