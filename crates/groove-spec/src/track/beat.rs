//! Beat (percussion) layer.

use serde::{Deserialize, Serialize};

use super::timing::TimePoint;

/// Percussion voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Kick,
    Snare,
}

impl Instrument {
    pub const NAMES: &'static [&'static str] = &["kick", "snare"];
}

/// A single percussive hit. Hits are instantaneous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatEvent {
    pub id: String,
    pub start: TimePoint,
    pub instrument: Instrument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
}

impl BeatEvent {
    pub fn new(id: impl Into<String>, start: TimePoint, instrument: Instrument) -> Self {
        Self {
            id: id.into(),
            start,
            instrument,
            velocity: None,
        }
    }
}

/// The beat layer. Literal events only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatTrack {
    pub events: Vec<BeatEvent>,
}
