//! Harmony regions: roman numerals, explicit chords, and tonal centers.

use serde::{Deserialize, Serialize};

use super::timing::TimeSpan;
use super::ModeName;

/// A harmonic region, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HarmonyRegion {
    Roman {
        id: String,
        span: TimeSpan,
        label: String,
        data: RomanData,
    },
    Chord {
        id: String,
        span: TimeSpan,
        label: String,
        data: ChordData,
    },
    Tonic {
        id: String,
        span: TimeSpan,
        label: String,
        data: TonicData,
    },
}

impl HarmonyRegion {
    pub const KINDS: &'static [&'static str] = &["roman", "chord", "tonic"];

    pub fn id(&self) -> &str {
        match self {
            HarmonyRegion::Roman { id, .. }
            | HarmonyRegion::Chord { id, .. }
            | HarmonyRegion::Tonic { id, .. } => id,
        }
    }

    pub fn span(&self) -> &TimeSpan {
        match self {
            HarmonyRegion::Roman { span, .. }
            | HarmonyRegion::Chord { span, .. }
            | HarmonyRegion::Tonic { span, .. } => span,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            HarmonyRegion::Roman { label, .. }
            | HarmonyRegion::Chord { label, .. }
            | HarmonyRegion::Tonic { label, .. } => label,
        }
    }
}

/// Roman-numeral analysis of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomanData {
    pub numeral: RomanNumeral,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<TriadQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inversion: Option<String>,
}

/// Scale-degree numeral, case encoding the diatonic quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomanNumeral {
    #[serde(rename = "I")]
    One,
    #[serde(rename = "ii")]
    Two,
    #[serde(rename = "iii")]
    Three,
    #[serde(rename = "IV")]
    Four,
    #[serde(rename = "V")]
    Five,
    #[serde(rename = "vi")]
    Six,
    #[serde(rename = "vii°")]
    Seven,
}

impl RomanNumeral {
    pub const NAMES: &'static [&'static str] = &["I", "ii", "iii", "IV", "V", "vi", "vii°"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriadQuality {
    Maj,
    Min,
    Dim,
    Aug,
}

impl TriadQuality {
    pub const NAMES: &'static [&'static str] = &["maj", "min", "dim", "aug"];
}

/// An explicitly named chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordData {
    /// Root pitch class (0-11).
    pub root_pc: u8,
    pub quality: ChordQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Maj,
    Min,
    Dim,
    Aug,
    Sus2,
    Sus4,
}

impl ChordQuality {
    pub const NAMES: &'static [&'static str] = &["maj", "min", "dim", "aug", "sus2", "sus4"];
}

/// A local tonal center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonicData {
    /// Tonic pitch class (0-11).
    pub tonic_pc: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeName>,
}

/// The harmony layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonyTrack {
    pub regions: Vec<HarmonyRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::timing::{Duration, TimePoint};

    #[test]
    fn test_region_kinds_round_trip() {
        let json = serde_json::json!({
            "id": "h1",
            "kind": "chord",
            "label": "Em7",
            "span": {"start": {"bar": 0, "beat": 0}, "duration": {"bars": 2}},
            "data": {"rootPc": 4, "quality": "min", "extensions": ["7"]}
        });
        let region: HarmonyRegion = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(region.id(), "h1");
        assert_eq!(region.label(), "Em7");
        assert_eq!(
            region.span(),
            &TimeSpan::new(TimePoint::new(0, 0.0), Duration::bars(2))
        );
        assert_eq!(serde_json::to_value(&region).unwrap(), json);
    }

    #[test]
    fn test_roman_numeral_names() {
        let data: RomanData = serde_json::from_str(r#"{"numeral":"vii°","quality":"dim"}"#).unwrap();
        assert_eq!(data.numeral, RomanNumeral::Seven);
        assert_eq!(data.quality, Some(TriadQuality::Dim));
    }
}
