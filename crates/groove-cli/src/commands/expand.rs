//! Expand command implementation
//!
//! Validates a track and writes its expanded bass and beat event lists.

use anyhow::{Context, Result};
use colored::Colorize;
use groove_spec::expand_track;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::input::load_track;

/// Run the expand command.
///
/// # Arguments
/// * `track_path` - Path to the track JSON file
/// * `output` - Output file (default: stdout)
/// * `compact` - Emit compact instead of pretty-printed JSON
pub fn run(track_path: &str, output: Option<&str>, compact: bool) -> Result<ExitCode> {
    let track = load_track(Path::new(track_path))
        .with_context(|| format!("Failed to load track file: {}", track_path))?;

    let expanded = expand_track(&track);
    let json = if compact {
        serde_json::to_string(&expanded)?
    } else {
        serde_json::to_string_pretty(&expanded)?
    };

    match output {
        Some(out_path) => {
            fs::write(out_path, &json)
                .with_context(|| format!("Failed to write output file: {}", out_path))?;
            eprintln!(
                "{} {} bass / {} beat event(s) to {}",
                "Expanded".green().bold(),
                expanded.bass.len(),
                expanded.beat.len(),
                out_path
            );
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
