//! Conversions between bar/beat/tick positions and flat tick counts.
//!
//! All arithmetic is done on integer ticks. Only `beat` fields carry
//! fractional values; they are resolved to the nearest tick, which is exact
//! for every subdivision the tick resolution can express (with 240 ticks per
//! beat: halves, quarters, eighths, thirds, ...).
//!
//! Conversions saturate instead of overflowing and never divide by zero, so
//! they are total over hand-built values as well as validated tracks.
//!
//! Bounds checks use the unrounded `*_position` / `*_length` forms instead,
//! so a fractional beat just before a boundary stays before it.

use crate::track::{Duration, TimePoint};

/// A flat position or length in ticks.
pub type Ticks = u64;

/// Meter and resolution that parameterize every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeGrid {
    beats_per_bar: u32,
    ticks_per_beat: u32,
}

impl TimeGrid {
    /// Creates a grid from `beatsPerBar` and `ticksPerBeat`.
    pub fn new(beats_per_bar: u32, ticks_per_beat: u32) -> Self {
        Self {
            beats_per_bar,
            ticks_per_beat,
        }
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    pub fn ticks_per_beat(&self) -> u32 {
        self.ticks_per_beat
    }

    /// `beatsPerBar * ticksPerBeat`.
    pub fn ticks_per_bar(&self) -> Ticks {
        self.beats_per_bar as Ticks * self.ticks_per_beat as Ticks
    }

    /// Resolves a (possibly fractional) beat count to ticks.
    ///
    /// Negative and non-finite inputs resolve to zero.
    pub fn beats_to_ticks(&self, beats: f64) -> Ticks {
        // `as` saturates: NaN and negatives become 0, huge values Ticks::MAX.
        (beats * self.ticks_per_beat as f64).round() as Ticks
    }

    /// `(bar * beatsPerBar + beat) * ticksPerBeat + tick`.
    pub fn point_to_ticks(&self, point: &TimePoint) -> Ticks {
        (point.bar as Ticks)
            .saturating_mul(self.ticks_per_bar())
            .saturating_add(self.beats_to_ticks(point.beat))
            .saturating_add(point.tick_or_default() as Ticks)
    }

    /// `bars * ticksPerBar + beats * ticksPerBeat + ticks`, absent units as zero.
    pub fn duration_to_ticks(&self, duration: &Duration) -> Ticks {
        (duration.bars.unwrap_or(0) as Ticks)
            .saturating_mul(self.ticks_per_bar())
            .saturating_add(self.beats_to_ticks(duration.beats.unwrap_or(0.0)))
            .saturating_add(duration.ticks.unwrap_or(0) as Ticks)
    }

    /// Unrounded tick position of `point`: `(bar * beatsPerBar + beat) * ticksPerBeat + tick`.
    pub fn point_position(&self, point: &TimePoint) -> f64 {
        (point.bar as f64 * self.beats_per_bar as f64 + point.beat) * self.ticks_per_beat as f64
            + point.tick_or_default() as f64
    }

    /// Unrounded tick length of `duration`, absent units as zero.
    pub fn duration_length(&self, duration: &Duration) -> f64 {
        let ticks_per_beat = self.ticks_per_beat as f64;
        duration.bars.unwrap_or(0) as f64 * self.beats_per_bar as f64 * ticks_per_beat
            + duration.beats.unwrap_or(0.0) * ticks_per_beat
            + duration.ticks.unwrap_or(0) as f64
    }

    /// Inverse of [`point_to_ticks`](Self::point_to_ticks) in canonical form:
    /// whole beats, and no `tick` field when the tick offset is zero.
    pub fn ticks_to_point(&self, ticks: Ticks) -> TimePoint {
        let ticks_per_beat = (self.ticks_per_beat as Ticks).max(1);
        let ticks_per_bar = self.ticks_per_bar().max(1);

        let bar = ticks / ticks_per_bar;
        let remaining = ticks % ticks_per_bar;
        let beat = remaining / ticks_per_beat;
        let tick = remaining % ticks_per_beat;

        TimePoint {
            bar: u32::try_from(bar).unwrap_or(u32::MAX),
            beat: beat as f64,
            tick: (tick != 0).then_some(tick as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TimeGrid {
        TimeGrid::new(4, 240)
    }

    #[test]
    fn test_point_to_ticks() {
        let grid = grid();
        assert_eq!(grid.point_to_ticks(&TimePoint::new(0, 0.0)), 0);
        assert_eq!(grid.point_to_ticks(&TimePoint::new(1, 0.0)), 960);
        assert_eq!(grid.point_to_ticks(&TimePoint::new(0, 2.0)), 480);
        assert_eq!(grid.point_to_ticks(&TimePoint::new(0, 1.25)), 300);
        assert_eq!(grid.point_to_ticks(&TimePoint::with_tick(2, 3.0, 17)), 2 * 960 + 720 + 17);
    }

    #[test]
    fn test_duration_to_ticks() {
        let grid = grid();
        assert_eq!(grid.duration_to_ticks(&Duration::bars(2)), 1920);
        assert_eq!(grid.duration_to_ticks(&Duration::beats(0.5)), 120);
        assert_eq!(grid.duration_to_ticks(&Duration::ticks(30)), 30);
        let mixed = Duration {
            bars: Some(1),
            beats: Some(1.0),
            ticks: Some(10),
        };
        assert_eq!(grid.duration_to_ticks(&mixed), 960 + 240 + 10);
        assert_eq!(grid.duration_to_ticks(&Duration::default()), 0);
    }

    #[test]
    fn test_ticks_to_point_canonical_form() {
        let grid = grid();
        assert_eq!(grid.ticks_to_point(0), TimePoint::new(0, 0.0));
        assert_eq!(grid.ticks_to_point(960 + 480), TimePoint::new(1, 2.0));
        assert_eq!(grid.ticks_to_point(960 + 250), TimePoint::with_tick(1, 1.0, 10));
        assert!(grid.ticks_to_point(1920).tick.is_none());
    }

    #[test]
    fn test_round_trip_with_nonzero_tick() {
        let grid = TimeGrid::new(3, 96);
        for bar in 0..4 {
            for beat in 0..3 {
                for tick in [1u32, 47, 95] {
                    let point = TimePoint::with_tick(bar, beat as f64, tick);
                    assert_eq!(grid.ticks_to_point(grid.point_to_ticks(&point)), point);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_drops_zero_tick() {
        let grid = grid();
        let point = TimePoint::with_tick(3, 1.0, 0);
        let back = grid.ticks_to_point(grid.point_to_ticks(&point));
        assert_eq!(back, TimePoint::new(3, 1.0));
    }

    #[test]
    fn test_degenerate_grid_does_not_panic() {
        let grid = TimeGrid::new(0, 0);
        assert_eq!(grid.ticks_per_bar(), 0);
        assert_eq!(grid.ticks_to_point(5), TimePoint::new(5, 0.0));
        assert_eq!(grid.point_to_ticks(&TimePoint::new(u32::MAX, 3.0)), 0);
    }

    #[test]
    fn test_exact_position_keeps_fractions() {
        let grid = grid();
        let point = TimePoint::new(0, 3.999);
        assert_eq!(grid.point_to_ticks(&point), 960);
        assert!(grid.point_position(&point) < 960.0);
        assert_eq!(grid.point_position(&TimePoint::with_tick(1, 2.0, 17)), 1457.0);
        assert!((grid.duration_length(&Duration::beats(0.001)) - 0.24).abs() < 1e-9);
        assert_eq!(grid.duration_length(&Duration::bars(2)), 1920.0);
    }

    #[test]
    fn test_negative_beats_resolve_to_zero() {
        assert_eq!(grid().beats_to_ticks(-1.0), 0);
        assert_eq!(grid().beats_to_ticks(f64::NAN), 0);
    }
}
