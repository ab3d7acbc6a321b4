//! Groove Strata Track Library
//!
//! This crate provides the document model, validation, pattern expansion and
//! hashing for Groove Strata tracks: JSON transcriptions of bass lines and
//! drum parts on a bar/beat/tick time grid.
//!
//! # Overview
//!
//! - **Time arithmetic**: conversions between bar/beat/tick positions and flat
//!   tick counts for a given meter and resolution
//! - **Validation**: a structural phase over raw JSON followed by a semantic
//!   phase over the typed track, each accumulating every error with its path
//! - **Expansion**: pattern placements flattened into one time-sorted,
//!   deterministically identified event list per layer
//!
//! # Example
//!
//! ```
//! use groove_spec::{canonical_track_hash, expand_track, validate_track, Track};
//!
//! // A blank one-bar track, as an editor would start it
//! let value = Track::draft("demo").to_value().unwrap();
//!
//! // Validate the raw document
//! let track = validate_track(&value).unwrap();
//!
//! // Flatten the layers for rendering
//! let expanded = expand_track(&track);
//! assert!(expanded.bass.is_empty());
//!
//! // Compute the canonical hash
//! let hash = canonical_track_hash(&track).unwrap();
//! println!("Track hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and validation error codes
//! - [`time`]: Tick arithmetic
//! - [`track`]: Track document model
//! - [`validation`]: Two-phase validation
//! - [`expand`]: Pattern expansion
//! - [`hash`]: Canonical hashing
//! - [`intervals`]: Interval table relative to the tonic
//! - [`editor`]: Step-grid conversion and track export
//! - [`library`]: Library index model

pub mod editor;
pub mod error;
pub mod expand;
pub mod hash;
pub mod intervals;
pub mod library;
pub mod time;
pub mod track;
pub mod validation;

// Re-export commonly used types at the crate root
pub use editor::{
    bass_events_from_steps, clamp_midi, export_track_id, slugify, step_notes_from_events,
    to_midi, StepNote, TrackExport,
};
pub use error::{ErrorCode, TrackError, ValidationError, ValidationErrors, ValidationPhase};
pub use expand::{expand_bass_events, expand_beat_events, expand_track, ExpandedTrack};
pub use hash::{canonical_track_hash, canonical_value_hash, canonicalize_json};
pub use intervals::{interval_index, interval_spec, IntervalSpec, INTERVALS};
pub use library::{index_url, track_url, TrackIndex, TrackIndexEntry, DEFAULT_LIBRARY_BASE_URL};
pub use time::{Ticks, TimeGrid};
pub use track::{
    BassEvent, BassPatternDef, BassPatternEvent, BassTrack, BeatEvent, BeatTrack, Duration,
    HarmonyRegion, Instrument, ModeName, PatternPlacement, Pitch, Repeat, Technique, TimePoint,
    TimeSignature, TimeSpan, Track,
};
pub use validation::{check_semantics, validate_track, validate_track_json};
