//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag of `validate`, `hash` and `library`.

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Validation errors pass their `E0xx`/`E1xx` codes through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Library index could not be parsed
    pub const INDEX_PARSE: &str = "CLI_002";
    /// Index entry does not match the track it points to
    pub const INDEX_MISMATCH: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E110")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Dot path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the field path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Converts a validation error, keeping the root path `""` as-is.
pub fn validation_error_to_json(err: &groove_spec::ValidationError) -> JsonError {
    JsonError::new(err.code.code(), &err.message).with_path(&err.path)
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub ok: bool,
    pub errors: Vec<JsonError>,
    /// Canonical track hash (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl ValidateOutput {
    pub fn success(track_hash: String, source_hash: String) -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            track_hash: Some(track_hash),
            source_hash: Some(source_hash),
        }
    }

    pub fn failure(errors: Vec<JsonError>, source_hash: Option<String>) -> Self {
        Self {
            ok: false,
            errors,
            track_hash: None,
            source_hash,
        }
    }
}

/// JSON output for the `hash` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashOutput {
    pub track_id: String,
    pub track_hash: String,
}

/// Per-track result of the `library` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryTrackResult {
    pub id: String,
    pub path: String,
    /// Where the track is served from under the library base URL
    pub url: String,
    pub ok: bool,
    pub errors: Vec<JsonError>,
}

/// JSON output for the `library` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOutput {
    pub ok: bool,
    pub index_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub tracks: Vec<LibraryTrackResult>,
}
