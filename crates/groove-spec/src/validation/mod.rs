//! Two-phase track validation.
//!
//! The structural phase checks the raw JSON against the document schema. Only
//! a document that passes it is deserialized into a [`Track`] and handed to
//! the semantic phase, which checks musical-time invariants. Both phases
//! accumulate; a failing result carries every error of the phase that failed.

mod semantic;
mod structural;

#[cfg(test)]
mod tests;

use serde_json::Value;

use crate::error::{ErrorCode, ValidationError, ValidationErrors};
use crate::track::Track;

use semantic::SemanticChecker;
use structural::SchemaChecker;

/// Validates a candidate track document.
///
/// # Returns
/// * `Ok(Track)` if both phases pass.
/// * `Err(ValidationErrors)` with every structural error, or, if the schema
///   holds, every semantic error.
///
/// # Example
/// ```
/// use groove_spec::{validate_track, Track};
///
/// let value = Track::draft("demo").to_value().unwrap();
/// let track = validate_track(&value).unwrap();
/// assert_eq!(track.id, "demo");
/// ```
pub fn validate_track(value: &Value) -> Result<Track, ValidationErrors> {
    let mut schema = SchemaChecker::new();
    schema.check_track(value);
    let errors = schema.into_errors();
    if !errors.is_empty() {
        log::debug!("structural validation failed with {} error(s)", errors.len());
        return Err(errors);
    }

    let track: Track = serde_json::from_value(value.clone()).map_err(|e| {
        ValidationErrors::from(vec![ValidationError::new(
            ErrorCode::MalformedDocument,
            "",
            e.to_string(),
        )])
    })?;

    let errors = check_semantics(&track);
    if !errors.is_empty() {
        log::debug!(
            "semantic validation of '{}' failed with {} error(s)",
            track.id,
            errors.len()
        );
        return Err(errors);
    }

    log::debug!("track '{}' is valid", track.id);
    Ok(track)
}

/// Parses JSON text and validates it.
///
/// Text that is not JSON yields a single structural error at the root path.
pub fn validate_track_json(json: &str) -> Result<Track, ValidationErrors> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        ValidationErrors::from(vec![ValidationError::new(
            ErrorCode::MalformedDocument,
            "",
            format!("Invalid JSON: {}", e),
        )])
    })?;
    validate_track(&value)
}

/// Runs only the semantic phase over an already-typed track.
///
/// Useful for tracks built in code, which skip the schema.
pub fn check_semantics(track: &Track) -> ValidationErrors {
    let mut checker = SemanticChecker::new(track);
    checker.check();
    checker.into_errors()
}
