//! Interval of a note relative to the track tonic.

use serde::Serialize;

/// One entry of the interval table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSpec {
    pub semitones: u8,
    pub label: &'static str,
    pub short_label: &'static str,
}

const fn interval(semitones: u8, label: &'static str, short_label: &'static str) -> IntervalSpec {
    IntervalSpec {
        semitones,
        label,
        short_label,
    }
}

/// Intervals from unison to octave, indexed by semitone count.
pub static INTERVALS: [IntervalSpec; 13] = [
    interval(0, "Root", "root"),
    interval(1, "Minor 2nd", "m2"),
    interval(2, "Major 2nd", "M2"),
    interval(3, "Minor 3rd", "m3"),
    interval(4, "Major 3rd", "M3"),
    interval(5, "Perfect 4th", "P4"),
    interval(6, "Tritone", "TRI"),
    interval(7, "Perfect 5th", "P5"),
    interval(8, "Minor 6th", "m6"),
    interval(9, "Major 6th", "M6"),
    interval(10, "Minor 7th", "m7"),
    interval(11, "Major 7th", "M7"),
    interval(12, "Octave", "8ve"),
];

/// Semitones (0-11) from the tonic pitch class up to `midi`'s pitch class.
pub fn interval_index(midi: u8, tonic_pc: u8) -> u8 {
    ((midi % 12) + 12 - (tonic_pc % 12)) % 12
}

/// Table entry for `semitones`, falling back to the root.
pub fn interval_spec(semitones: u8) -> &'static IntervalSpec {
    INTERVALS
        .get(semitones as usize)
        .unwrap_or(&INTERVALS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_semitones() {
        for (i, spec) in INTERVALS.iter().enumerate() {
            assert_eq!(spec.semitones as usize, i);
        }
        assert_eq!(INTERVALS[7].label, "Perfect 5th");
        assert_eq!(INTERVALS[12].short_label, "8ve");
    }

    #[test]
    fn test_interval_index() {
        // E (4) over a C tonic is a major third.
        assert_eq!(interval_index(40, 0), 4);
        // C over an E tonic wraps to a minor sixth.
        assert_eq!(interval_index(36, 4), 8);
        assert_eq!(interval_index(45, 9), 0);
    }

    #[test]
    fn test_interval_spec_fallback() {
        assert_eq!(interval_spec(6).short_label, "TRI");
        assert_eq!(interval_spec(13).label, "Root");
        assert_eq!(interval_spec(200), &INTERVALS[0]);
    }
}
