//! Library command implementation
//!
//! Validates every track listed in a local library's `index.json`.

use anyhow::{Context, Result};
use colored::Colorize;
use groove_spec::library::INDEX_FILE_NAME;
use groove_spec::{index_url, track_url, TrackIndex, TrackIndexEntry, DEFAULT_LIBRARY_BASE_URL};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, validation_error_to_json, JsonError, LibraryOutput, LibraryTrackResult,
};
use super::reporting;
use crate::input::read_track_source;

/// Run the library command.
///
/// # Arguments
/// * `library_dir` - Library root holding `index.json`
/// * `base_url` - Base URL the library is published under (for reported URLs)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every listed track is valid, 1 otherwise
pub fn run(library_dir: &str, base_url: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let root = Path::new(library_dir);
    let base_url = base_url.unwrap_or(DEFAULT_LIBRARY_BASE_URL);

    let index_path = root.join(INDEX_FILE_NAME);
    let index_text = fs::read_to_string(&index_path)
        .with_context(|| format!("Failed to read library index: {}", index_path.display()))?;
    let index = TrackIndex::from_json(&index_text)
        .with_context(|| format!("Failed to parse library index: {}", index_path.display()))?;

    if index.track_count != index.tracks.len() {
        log::warn!(
            "index declares trackCount {} but lists {} track(s)",
            index.track_count,
            index.tracks.len()
        );
    }

    if !json_output {
        println!(
            "{} {} ({} track(s))",
            "Library:".cyan().bold(),
            index_path.display(),
            index.tracks.len()
        );
    }

    let results: Vec<LibraryTrackResult> = index
        .tracks
        .iter()
        .map(|entry| check_entry(root, base_url, entry))
        .collect();
    let passed = results.iter().filter(|r| r.ok).count();
    let failed = results.len() - passed;

    if json_output {
        reporting::print_json(&LibraryOutput {
            ok: failed == 0,
            index_url: index_url(base_url),
            total: results.len(),
            passed,
            failed,
            tracks: results,
        })?;
    } else {
        for result in &results {
            print_result(result);
        }
        println!(
            "\n{} {} passed, {} failed",
            "Summary:".bold(),
            passed.to_string().green(),
            failed.to_string().red()
        );
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn check_entry(root: &Path, base_url: &str, entry: &TrackIndexEntry) -> LibraryTrackResult {
    let relative = entry.path.trim_start_matches('/');
    let errors = match read_track_source(&root.join(relative)) {
        Ok(source) => match source.validate() {
            Ok(track) if track.id != entry.id => vec![JsonError::new(
                error_codes::INDEX_MISMATCH,
                format!("index lists id '{}' but track has id '{}'", entry.id, track.id),
            )
            .with_path("id")],
            Ok(_) => Vec::new(),
            Err(errors) => errors.iter().map(validation_error_to_json).collect(),
        },
        Err(e) => vec![JsonError::new(error_codes::FILE_READ, e.to_string())],
    };

    log::debug!("{}: {} error(s)", entry.path, errors.len());
    LibraryTrackResult {
        id: entry.id.clone(),
        path: entry.path.clone(),
        url: track_url(base_url, &entry.path),
        ok: errors.is_empty(),
        errors,
    }
}

fn print_result(result: &LibraryTrackResult) {
    if result.ok {
        println!("  {} {}", "✓ PASS".green().bold(), result.path);
        return;
    }
    println!("  {} {}", "✗ FAIL".red().bold(), result.path);
    for error in &result.errors {
        let path_info = match error.path.as_deref() {
            Some(path) if !path.is_empty() => format!(" at {}", path),
            _ => String::new(),
        };
        println!(
            "      [{}]{}: {}",
            error.code.red(),
            path_info.dimmed(),
            error.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use groove_spec::Track;

    fn write_library(dir: &Path, tracks: &[(&str, &str, String)]) {
        fs::create_dir_all(dir.join("tracks")).unwrap();
        let entries: Vec<TrackIndexEntry> = tracks
            .iter()
            .map(|(id, path, json)| {
                fs::write(dir.join(path), json).unwrap();
                let mut entry = TrackIndexEntry::from_track(&Track::draft(*id), *path);
                entry.id = id.to_string();
                entry
            })
            .collect();
        let index = TrackIndex {
            generated_at: "2024-05-01T12:00:00Z".to_string(),
            track_count: entries.len(),
            tracks: entries,
        };
        fs::write(
            dir.join(INDEX_FILE_NAME),
            serde_json::to_string_pretty(&index).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_library_all_valid() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[("a", "tracks/a.json", Track::draft("a").to_json().unwrap())],
        );
        let code = run(dir.path().to_str().unwrap(), None, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_library_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("a", "tracks/a.json", Track::draft("a").to_json().unwrap()),
                ("b", "tracks/b.json", Track::draft("not-b").to_json().unwrap()),
                ("c", "tracks/c.json", "{}".to_string()),
            ],
        );
        let root = dir.path();

        let mismatch = check_entry(root, "https://example.com", &TrackIndexEntry::from_track(
            &Track::draft("b"),
            "tracks/b.json",
        ));
        assert!(!mismatch.ok);
        assert_eq!(mismatch.errors[0].code, error_codes::INDEX_MISMATCH);
        assert_eq!(mismatch.url, "https://example.com/tracks/b.json");

        let code = run(root.to_str().unwrap(), Some("https://example.com"), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_library_missing_track_file() {
        let dir = tempfile::tempdir().unwrap();
        write_library(dir.path(), &[]);
        let result = check_entry(
            dir.path(),
            DEFAULT_LIBRARY_BASE_URL,
            &TrackIndexEntry::from_track(&Track::draft("gone"), "/tracks/gone.json"),
        );
        assert!(!result.ok);
        assert_eq!(result.errors[0].code, error_codes::FILE_READ);
    }

    #[test]
    fn test_library_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path().to_str().unwrap(), None, false).is_err());
    }
}
