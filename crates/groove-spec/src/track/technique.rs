//! Playing technique annotations on bass events.
//!
//! Techniques are descriptive only; they never change timing or pitch
//! computation.

use serde::{Deserialize, Serialize};

/// A playing technique, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Technique {
    Slide {
        #[serde(rename = "toMidi", default, skip_serializing_if = "Option::is_none")]
        to_midi: Option<u8>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<SlideKind>,
    },
    HammerOn {
        #[serde(rename = "toMidi")]
        to_midi: u8,
    },
    PullOff {
        #[serde(rename = "toMidi")]
        to_midi: u8,
    },
    Bend {
        /// Bend amount in cents.
        cents: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        curve: Option<BendCurve>,
    },
    Vibrato {
        #[serde(rename = "depthCents", default, skip_serializing_if = "Option::is_none")]
        depth_cents: Option<i32>,
        #[serde(rename = "rateHz", default, skip_serializing_if = "Option::is_none")]
        rate_hz: Option<f64>,
    },
    Mute {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<MuteKind>,
    },
}

impl Technique {
    /// Wire names of every technique tag.
    pub const TYPES: &'static [&'static str] =
        &["slide", "hammerOn", "pullOff", "bend", "vibrato", "mute"];

    /// Returns the wire tag of this technique.
    pub fn type_name(&self) -> &'static str {
        match self {
            Technique::Slide { .. } => "slide",
            Technique::HammerOn { .. } => "hammerOn",
            Technique::PullOff { .. } => "pullOff",
            Technique::Bend { .. } => "bend",
            Technique::Vibrato { .. } => "vibrato",
            Technique::Mute { .. } => "mute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideKind {
    Shift,
    Legato,
}

impl SlideKind {
    pub const NAMES: &'static [&'static str] = &["shift", "legato"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BendCurve {
    Linear,
    Fast,
    Slow,
}

impl BendCurve {
    pub const NAMES: &'static [&'static str] = &["linear", "fast", "slow"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MuteKind {
    Palm,
    LeftHand,
}

impl MuteKind {
    pub const NAMES: &'static [&'static str] = &["palm", "leftHand"];
}
