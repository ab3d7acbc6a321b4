//! Hash command implementation
//!
//! Prints the canonical hash of a valid track.

use anyhow::{Context, Result};
use groove_spec::canonical_track_hash;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::HashOutput;
use super::reporting;
use crate::input::load_track;

/// Run the hash command.
pub fn run(track_path: &str, json_output: bool) -> Result<ExitCode> {
    let track = load_track(Path::new(track_path))
        .with_context(|| format!("Failed to load track file: {}", track_path))?;
    let track_hash = canonical_track_hash(&track)?;

    if json_output {
        reporting::print_json(&HashOutput {
            track_id: track.id,
            track_hash,
        })?;
    } else {
        println!("{}", track_hash);
    }
    Ok(ExitCode::SUCCESS)
}
