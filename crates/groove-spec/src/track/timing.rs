//! Musical time positions, durations, and spans.

use serde::{Deserialize, Serialize, Serializer};

/// Absolute (or pattern-relative) position in bars, beats, and ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Bar index (0-indexed).
    pub bar: u32,
    /// Beat within the bar; fractional values address subdivisions.
    #[serde(serialize_with = "serialize_beats")]
    pub beat: f64,
    /// Tick within the beat. Absent means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick: Option<u32>,
}

impl TimePoint {
    /// Creates a point on a beat boundary.
    pub fn new(bar: u32, beat: f64) -> Self {
        Self {
            bar,
            beat,
            tick: None,
        }
    }

    /// Creates a point with an explicit tick offset.
    pub fn with_tick(bar: u32, beat: f64, tick: u32) -> Self {
        Self {
            bar,
            beat,
            tick: Some(tick),
        }
    }

    /// Tick offset with the default substituted.
    pub fn tick_or_default(&self) -> u32 {
        self.tick.unwrap_or(0)
    }
}

/// Elapsed span in bars, beats, and ticks. At least one unit is expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bars: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_beats"
    )]
    pub beats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u32>,
}

impl Duration {
    /// A whole number of bars.
    pub fn bars(bars: u32) -> Self {
        Self {
            bars: Some(bars),
            ..Self::default()
        }
    }

    /// A number of beats.
    pub fn beats(beats: f64) -> Self {
        Self {
            beats: Some(beats),
            ..Self::default()
        }
    }

    /// A number of ticks.
    pub fn ticks(ticks: u32) -> Self {
        Self {
            ticks: Some(ticks),
            ..Self::default()
        }
    }

    /// Returns true if at least one unit is present.
    pub fn has_unit(&self) -> bool {
        self.bars.is_some() || self.beats.is_some() || self.ticks.is_some()
    }
}

/// A start point plus a duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: TimePoint,
    pub duration: Duration,
}

impl TimeSpan {
    /// Creates a span.
    pub fn new(start: TimePoint, duration: Duration) -> Self {
        Self { start, duration }
    }
}

/// Writes whole beat counts as JSON integers so that equal instants
/// serialize identically (`{"bar":1,"beat":0}`), fractional ones as floats.
pub(crate) fn serialize_beats<S: Serializer>(beats: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if beats.is_finite() && beats.fract() == 0.0 && beats.abs() < MAX_EXACT {
        serializer.serialize_i64(*beats as i64)
    } else {
        serializer.serialize_f64(*beats)
    }
}

fn serialize_opt_beats<S: Serializer>(
    beats: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match beats {
        Some(beats) => serialize_beats(beats, serializer),
        None => serializer.serialize_none(),
    }
}
