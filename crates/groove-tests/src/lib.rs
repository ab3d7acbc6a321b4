//! Test support for Groove Strata end-to-end tests.
//!
//! Fixture documents live at the repository root: `library/` holds a small
//! valid library with its index, `fixtures/invalid/` holds documents that
//! fail one validation phase each.

use std::fs;
use std::path::PathBuf;

use groove_spec::{validate_track_json, Track};

/// Locations of the checked-in fixture documents.
pub struct Fixtures;

impl Fixtures {
    fn repo_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
    }

    /// Root of the sample library (contains `index.json`).
    pub fn library_dir() -> PathBuf {
        Self::repo_root().join("library")
    }

    /// Directory of documents that must fail validation.
    pub fn invalid_dir() -> PathBuf {
        Self::repo_root().join("fixtures").join("invalid")
    }

    /// Reads a library track by file stem, e.g. `session--walking-c`.
    pub fn library_track_text(stem: &str) -> String {
        let path = Self::library_dir()
            .join("tracks")
            .join(format!("{}.json", stem));
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Reads and validates a library track, panicking on any error.
    pub fn library_track(stem: &str) -> Track {
        let text = Self::library_track_text(stem);
        validate_track_json(&text)
            .unwrap_or_else(|errors| panic!("Fixture {} is invalid:\n{}", stem, errors))
    }

    /// Reads an invalid fixture by file stem.
    pub fn invalid_text(stem: &str) -> String {
        let path = Self::invalid_dir().join(format!("{}.json", stem));
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}

/// Compact `(code, path)` pairs for assertions.
pub fn error_summary(errors: &groove_spec::ValidationErrors) -> Vec<(String, String)> {
    errors
        .iter()
        .map(|e| (e.code.code().to_string(), e.path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dirs_exist() {
        assert!(Fixtures::library_dir().join("index.json").exists());
        assert!(Fixtures::invalid_dir().exists());
    }
}
