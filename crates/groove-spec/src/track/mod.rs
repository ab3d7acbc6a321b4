//! Track document model.
//!
//! A [`Track`] is the aggregate root: meter, tick resolution, tonal center,
//! sections, the bass and beat layers, and optional harmony and annotations.
//! Field names follow the camelCase JSON wire format of existing track files.
//!
//! Tracks are plain values. They are produced by
//! [`validate_track`](crate::validation::validate_track) and never mutated by
//! this crate; derived views such as expanded event lists are recomputed on
//! demand.

pub mod bass;
pub mod beat;
pub mod harmony;
pub mod pitch;
pub mod technique;
pub mod timing;

use serde::{Deserialize, Serialize};

use crate::time::{Ticks, TimeGrid};

pub use bass::{BassEvent, BassPatternDef, BassPatternEvent, BassTrack, PatternPlacement, Repeat};
pub use beat::{BeatEvent, BeatTrack, Instrument};
pub use harmony::{
    ChordData, ChordQuality, HarmonyRegion, HarmonyTrack, RomanData, RomanNumeral, TonicData,
    TriadQuality,
};
pub use pitch::{Accidental, Letter, Pitch, PitchSpelling};
pub use technique::{BendCurve, MuteKind, SlideKind, Technique};
pub use timing::{Duration, TimePoint, TimeSpan};

/// Default tick resolution used for new drafts.
pub const DEFAULT_TICKS_PER_BEAT: u32 = 240;

/// A complete track document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TrackSource>,
    pub time_signature: TimeSignature,
    pub ticks_per_beat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_bpm: Option<f64>,
    /// Tonal center as a pitch class (0-11).
    pub tonic: u8,
    /// Register anchor for the tonic as a MIDI note number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonic_midi: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeName>,
    pub length: TrackLength,
    pub sections: Vec<Section>,
    pub bass: BassTrack,
    pub beat: BeatTrack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmony: Option<HarmonyTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<TextAnnotation>>,
}

impl Track {
    /// Parses a track from JSON without validating it.
    ///
    /// Use [`validate_track_json`](crate::validation::validate_track_json) for
    /// untrusted input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a track from a JSON value without validating it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the track to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the track to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Converts the track to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// The time grid of this track.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(self.time_signature.beats_per_bar, self.ticks_per_beat)
    }

    /// Total track length in ticks.
    pub fn length_ticks(&self) -> Ticks {
        (self.length.bars as Ticks).saturating_mul(self.grid().ticks_per_bar())
    }

    pub fn annotations(&self) -> &[TextAnnotation] {
        self.annotations.as_deref().unwrap_or_default()
    }

    pub fn harmony_regions(&self) -> &[HarmonyRegion] {
        self.harmony
            .as_ref()
            .map(|h| h.regions.as_slice())
            .unwrap_or_default()
    }

    /// A blank one-bar 4/4 track in C with empty bass and beat layers.
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "Untitled Track".to_string(),
            artist: Some("Unknown Artist".to_string()),
            source: None,
            time_signature: TimeSignature::common(),
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            tempo_bpm: None,
            tonic: 0,
            tonic_midi: Some(24),
            mode: None,
            length: TrackLength { bars: 1 },
            sections: vec![Section {
                id: "section-1".to_string(),
                name: "Section 1".to_string(),
                span: TimeSpan::new(TimePoint::new(0, 0.0), Duration::bars(1)),
                kind: None,
            }],
            bass: BassTrack {
                events: Some(Vec::new()),
                ..BassTrack::default()
            },
            beat: BeatTrack::default(),
            harmony: None,
            annotations: None,
        }
    }
}

/// Where a transcription came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Meter of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    pub beats_per_bar: u32,
    pub beat_unit: BeatUnit,
}

impl TimeSignature {
    /// 4/4.
    pub fn common() -> Self {
        Self {
            beats_per_bar: 4,
            beat_unit: BeatUnit::Quarter,
        }
    }
}

/// Note value that receives one beat. Serialized as its denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BeatUnit {
    Quarter,
    Eighth,
}

impl BeatUnit {
    pub const VALUES: &'static [u64] = &[4, 8];

    pub fn denominator(&self) -> u8 {
        match self {
            BeatUnit::Quarter => 4,
            BeatUnit::Eighth => 8,
        }
    }
}

impl TryFrom<u8> for BeatUnit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(BeatUnit::Quarter),
            8 => Ok(BeatUnit::Eighth),
            other => Err(format!("beat unit must be 4 or 8, got {}", other)),
        }
    }
}

impl From<BeatUnit> for u8 {
    fn from(unit: BeatUnit) -> u8 {
        unit.denominator()
    }
}

/// Track length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLength {
    pub bars: u32,
}

/// Diatonic mode names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl ModeName {
    pub const NAMES: &'static [&'static str] = &[
        "major",
        "minor",
        "dorian",
        "phrygian",
        "lydian",
        "mixolydian",
        "locrian",
    ];
}

/// A named structural section of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub span: TimeSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SectionKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
    Other,
}

impl SectionKind {
    pub const NAMES: &'static [&'static str] =
        &["intro", "verse", "chorus", "bridge", "outro", "other"];
}

/// Free text attached to a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub id: String,
    pub span: TimeSpan,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_unit_serde() {
        let sig: TimeSignature = serde_json::from_str(r#"{"beatsPerBar":6,"beatUnit":8}"#).unwrap();
        assert_eq!(sig.beats_per_bar, 6);
        assert_eq!(sig.beat_unit, BeatUnit::Eighth);
        assert_eq!(
            serde_json::to_string(&sig).unwrap(),
            r#"{"beatsPerBar":6,"beatUnit":8}"#
        );
        assert!(serde_json::from_str::<TimeSignature>(r#"{"beatsPerBar":4,"beatUnit":2}"#).is_err());
    }

    #[test]
    fn test_track_length_ticks() {
        let track = Track::draft("draft-1");
        assert_eq!(track.length_ticks(), 960);
        assert_eq!(track.grid().ticks_per_bar(), 960);
    }

    #[test]
    fn test_draft_round_trip() {
        let track = Track::draft("draft-1");
        let json = track.to_json().unwrap();
        let parsed = Track::from_json(&json).unwrap();
        assert_eq!(parsed, track);
        assert!(json.contains(r#""ticksPerBeat":240"#));
        assert!(json.contains(r#""tonicMidi":24"#));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut value = Track::draft("draft-1").to_value().unwrap();
        value["editorState"] = serde_json::json!({"zoom": 2});
        let track = Track::from_value(value).unwrap();
        assert_eq!(track.id, "draft-1");
    }
}
