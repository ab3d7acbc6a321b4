//! Bass layer: literal events, reusable patterns, and their placements.

use serde::{Deserialize, Serialize};

use super::pitch::Pitch;
use super::technique::Technique;
use super::timing::{Duration, TimePoint};

/// A single concrete bass note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BassEvent {
    /// Identifier, unique within its containing list.
    pub id: String,
    pub start: TimePoint,
    pub duration: Duration,
    pub pitch: Pitch,
    /// Velocity in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<Vec<Technique>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl BassEvent {
    /// Creates an event with no velocity, technique, or tags.
    pub fn new(id: impl Into<String>, start: TimePoint, duration: Duration, pitch: Pitch) -> Self {
        Self {
            id: id.into(),
            start,
            duration,
            pitch,
            velocity: None,
            technique: None,
            tags: None,
        }
    }
}

/// A bass event inside a pattern. `start` is relative to the pattern origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BassPatternEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: TimePoint,
    pub duration: Duration,
    pub pitch: Pitch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<Vec<Technique>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl BassPatternEvent {
    /// Creates a pattern event with no optional metadata.
    pub fn new(start: TimePoint, duration: Duration, pitch: Pitch) -> Self {
        Self {
            id: None,
            start,
            duration,
            pitch,
            velocity: None,
            technique: None,
            tags: None,
        }
    }

    /// Instantiates this event as a track event with the given identity and start.
    pub fn instantiate(&self, id: String, start: TimePoint) -> BassEvent {
        BassEvent {
            id,
            start,
            duration: self.duration,
            pitch: self.pitch.clone(),
            velocity: self.velocity,
            technique: self.technique.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// A reusable, position-independent run of bass events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BassPatternDef {
    /// Identifier, unique among patterns.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub length: Duration,
    pub events: Vec<BassPatternEvent>,
}

/// Repetition of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repeat {
    /// Number of iterations (at least 1).
    pub times: u32,
    /// Interval between iteration starts. Defaults to the pattern length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every: Option<Duration>,
}

/// An instantiation of a pattern at a track-absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternPlacement {
    pub id: String,
    pub pattern_id: String,
    pub start: TimePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

impl PatternPlacement {
    /// Iteration count with the default of one substituted.
    pub fn times(&self) -> u32 {
        self.repeat.map_or(1, |r| r.times)
    }

    /// Explicit repeat interval, if any.
    pub fn every(&self) -> Option<&Duration> {
        self.repeat.as_ref().and_then(|r| r.every.as_ref())
    }
}

/// The bass layer. All three note sources may coexist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BassTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<BassPatternDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<PatternPlacement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<BassEvent>>,
}

impl BassTrack {
    pub fn patterns(&self) -> &[BassPatternDef] {
        self.patterns.as_deref().unwrap_or_default()
    }

    pub fn placements(&self) -> &[PatternPlacement] {
        self.placements.as_deref().unwrap_or_default()
    }

    pub fn events(&self) -> &[BassEvent] {
        self.events.as_deref().unwrap_or_default()
    }

    /// Looks up a pattern by id.
    pub fn pattern(&self, id: &str) -> Option<&BassPatternDef> {
        self.patterns().iter().find(|p| p.id == id)
    }
}
