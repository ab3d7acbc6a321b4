//! Pitch types.

use serde::{Deserialize, Serialize};

/// Highest valid MIDI note number.
pub const MAX_MIDI: u8 = 127;

/// Highest valid pitch class.
pub const MAX_PITCH_CLASS: u8 = 11;

/// A concrete pitch. The MIDI number is authoritative; spelling is a display hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    /// MIDI note number (0-127).
    pub midi: u8,
    /// Optional enharmonic spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling: Option<PitchSpelling>,
}

impl Pitch {
    /// Creates an unspelled pitch.
    pub fn midi(midi: u8) -> Self {
        Self {
            midi,
            spelling: None,
        }
    }

    /// Pitch class (0-11) of this pitch.
    pub fn pitch_class(&self) -> u8 {
        self.midi % 12
    }
}

/// Letter, accidental, and octave of a written note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchSpelling {
    pub letter: Letter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octave: Option<i32>,
}

/// Note letter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    pub const NAMES: &'static [&'static str] = &["A", "B", "C", "D", "E", "F", "G"];
}

/// Accidental applied to a letter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    #[serde(rename = "b")]
    Flat,
    #[serde(rename = "#")]
    Sharp,
    #[serde(rename = "♮")]
    Natural,
}

impl Accidental {
    pub const NAMES: &'static [&'static str] = &["b", "#", "♮"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class() {
        assert_eq!(Pitch::midi(40).pitch_class(), 4);
        assert_eq!(Pitch::midi(36).pitch_class(), 0);
    }

    #[test]
    fn test_spelling_serde() {
        let spelling: PitchSpelling =
            serde_json::from_str(r#"{"letter":"E","accidental":"b","octave":2}"#).unwrap();
        assert_eq!(spelling.letter, Letter::E);
        assert_eq!(spelling.accidental, Some(Accidental::Flat));
        assert_eq!(spelling.octave, Some(2));

        let json = serde_json::to_string(&Accidental::Natural).unwrap();
        assert_eq!(json, "\"♮\"");
    }
}
