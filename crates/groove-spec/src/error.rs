//! Error types for track validation and processing.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Which validation phase produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationPhase {
    /// Schema conformance (types, required fields, enumerations, ranges).
    Structural,
    /// Musical-time consistency of a schema-conforming document.
    Semantic,
}

/// Stable error codes for track validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Structural errors (E001-E007)
    /// E001: Required field is missing
    MissingField,
    /// E002: Value has the wrong JSON type
    InvalidType,
    /// E003: Number outside its allowed range
    NumberOutOfRange,
    /// E004: Value is not one of the allowed enumerated values
    InvalidEnumValue,
    /// E005: String does not match its required format
    InvalidFormat,
    /// E006: Duration declares none of bars, beats, ticks
    EmptyDuration,
    /// E007: Document could not be read into the track model
    MalformedDocument,

    // Semantic errors (E101-E113)
    /// E101: TimePoint beat outside [0, beatsPerBar)
    BeatOutOfRange,
    /// E102: TimePoint tick outside [0, ticksPerBeat)
    TickOutOfRange,
    /// E103: TimePoint lies at or beyond the end of the track
    TimePointOutOfBounds,
    /// E104: Duration beats outside [0, beatsPerBar)
    DurationBeatsOutOfRange,
    /// E105: Duration ticks outside [0, ticksPerBeat)
    DurationTicksOutOfRange,
    /// E106: Duration resolves to zero ticks
    DurationNotPositive,
    /// E107: Span ends after the track
    SpanExceedsTrack,
    /// E108: Bass event ends after the track
    EventExceedsTrack,
    /// E109: Pattern event ends after its pattern
    EventExceedsPattern,
    /// E110: Placement references an undeclared pattern
    UnresolvedPattern,
    /// E111: Repeat count below one
    InvalidRepeatTimes,
    /// E112: A placement iteration ends after the track
    PlacementExceedsTrack,
    /// E113: Id repeated within its containing list
    DuplicateId,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MissingField => "E001",
            ErrorCode::InvalidType => "E002",
            ErrorCode::NumberOutOfRange => "E003",
            ErrorCode::InvalidEnumValue => "E004",
            ErrorCode::InvalidFormat => "E005",
            ErrorCode::EmptyDuration => "E006",
            ErrorCode::MalformedDocument => "E007",
            ErrorCode::BeatOutOfRange => "E101",
            ErrorCode::TickOutOfRange => "E102",
            ErrorCode::TimePointOutOfBounds => "E103",
            ErrorCode::DurationBeatsOutOfRange => "E104",
            ErrorCode::DurationTicksOutOfRange => "E105",
            ErrorCode::DurationNotPositive => "E106",
            ErrorCode::SpanExceedsTrack => "E107",
            ErrorCode::EventExceedsTrack => "E108",
            ErrorCode::EventExceedsPattern => "E109",
            ErrorCode::UnresolvedPattern => "E110",
            ErrorCode::InvalidRepeatTimes => "E111",
            ErrorCode::PlacementExceedsTrack => "E112",
            ErrorCode::DuplicateId => "E113",
        }
    }

    /// Returns the phase that reports this code.
    ///
    /// `EmptyDuration` is raised by both phases; the schema check normally
    /// catches it first.
    pub fn phase(&self) -> ValidationPhase {
        match self {
            ErrorCode::MissingField
            | ErrorCode::InvalidType
            | ErrorCode::NumberOutOfRange
            | ErrorCode::InvalidEnumValue
            | ErrorCode::InvalidFormat
            | ErrorCode::EmptyDuration
            | ErrorCode::MalformedDocument => ValidationPhase::Structural,
            _ => ValidationPhase::Semantic,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A validation error with code, dot-separated field path, and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Path to the problematic field (e.g., "bass.placements.2.start").
    /// Empty for errors about the document root.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error at the given path.
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{}: {} (at {})", self.code, self.message, self.path)
        }
    }
}

impl std::error::Error for ValidationError {}

/// The full list of errors reported for a rejected document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Returns the phase that rejected the document, if any errors exist.
    pub fn phase(&self) -> Option<ValidationPhase> {
        self.0.first().map(|e| e.code.phase())
    }

    /// Returns true if any error at `path` has the given code.
    pub fn contains(&self, code: ErrorCode, path: &str) -> bool {
        self.0.iter().any(|e| e.code == code && e.path == path)
    }

    /// Consumes the list and returns the inner errors.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl std::ops::Deref for ValidationErrors {
    type Target = [ValidationError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track validation failed with {} error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Top-level error type for track operations.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Track validation failed with one or more errors.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Canonicalization error.
    #[error("canonicalization error: {0}")]
    Canonicalization(String),
}
