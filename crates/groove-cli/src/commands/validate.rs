//! Validate command implementation
//!
//! Validates a track file and reports every error with its field path.

use anyhow::{Context, Result};
use colored::Colorize;
use groove_spec::canonical_track_hash;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, validation_error_to_json, JsonError, ValidateOutput};
use super::reporting;
use crate::input::read_track_source;

/// Run the validate command
///
/// # Arguments
/// * `track_path` - Path to the track JSON file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(track_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(track_path)
    } else {
        run_human(track_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(track_path: &str) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Validating:".cyan().bold(), track_path);

    let source = read_track_source(Path::new(track_path))
        .with_context(|| format!("Failed to load track file: {}", track_path))?;
    println!("{} {}", "Source:".dimmed(), &source.source_hash[..16]);

    let result = source.validate();
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(track) => {
            let track_hash = canonical_track_hash(&track)?;
            println!("{} {}", "Track hash:".dimmed(), track_hash);
            println!(
                "\n{} Track '{}' is valid ({}ms)",
                "SUCCESS".green().bold(),
                track.id,
                duration_ms
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            reporting::print_validation_errors(&errors);
            println!(
                "\n{} Track has {} error(s) ({}ms)",
                "FAILED".red().bold(),
                errors.len(),
                duration_ms
            );
            Ok(ExitCode::from(1))
        }
    }
}

/// Run validate with machine-readable JSON output
fn run_json(track_path: &str) -> Result<ExitCode> {
    let source = match read_track_source(Path::new(track_path)) {
        Ok(source) => source,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_READ, e.to_string());
            reporting::print_json(&ValidateOutput::failure(vec![error], None))?;
            return Ok(ExitCode::from(1));
        }
    };

    let (output, code) = match source.validate() {
        Ok(track) => {
            let track_hash = canonical_track_hash(&track)?;
            (
                ValidateOutput::success(track_hash, source.source_hash),
                ExitCode::SUCCESS,
            )
        }
        Err(errors) => {
            let errors = errors.iter().map(validation_error_to_json).collect();
            (
                ValidateOutput::failure(errors, Some(source.source_hash)),
                ExitCode::from(1),
            )
        }
    };

    reporting::print_json(&output)?;
    Ok(code)
}
