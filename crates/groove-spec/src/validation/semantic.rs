//! Semantic validation of a schema-conforming track.
//!
//! Every check accumulates; a single pass reports every musical-time
//! violation in the document. Bounds are compared on unrounded tick
//! positions, and each check costs O(1) regardless of repeat counts.

use std::collections::HashSet;

use super::structural::child;
use crate::error::{ErrorCode, ValidationError, ValidationErrors};
use crate::time::TimeGrid;
use crate::track::{
    BassEvent, BassPatternDef, BeatEvent, Duration, PatternPlacement, TimePoint, TimeSpan, Track,
};

/// Scope a time point is bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointScope {
    /// Track-absolute: must lie before the end of the track.
    Track,
    /// Pattern-relative: bounded by the pattern length instead.
    Pattern,
}

pub(crate) struct SemanticChecker<'t> {
    track: &'t Track,
    grid: TimeGrid,
    track_length: f64,
    errors: ValidationErrors,
}

impl<'t> SemanticChecker<'t> {
    pub(crate) fn new(track: &'t Track) -> Self {
        Self {
            track,
            grid: track.grid(),
            track_length: track.length_ticks() as f64,
            errors: ValidationErrors::new(),
        }
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    fn fail(&mut self, code: ErrorCode, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(code, path, message));
    }

    pub(crate) fn check(&mut self) {
        let track = self.track;

        for (i, section) in track.sections.iter().enumerate() {
            self.check_span(&section.span, &format!("sections.{}.span", i));
        }
        for (i, annotation) in track.annotations().iter().enumerate() {
            self.check_span(&annotation.span, &format!("annotations.{}.span", i));
        }
        for (i, region) in track.harmony_regions().iter().enumerate() {
            self.check_span(region.span(), &format!("harmony.regions.{}.span", i));
        }
        for (i, pattern) in track.bass.patterns().iter().enumerate() {
            self.check_pattern(pattern, &format!("bass.patterns.{}", i));
        }
        for (i, placement) in track.bass.placements().iter().enumerate() {
            self.check_placement(placement, &format!("bass.placements.{}", i));
        }
        for (i, event) in track.bass.events().iter().enumerate() {
            self.check_bass_event(event, &format!("bass.events.{}", i));
        }
        for (i, event) in track.beat.events.iter().enumerate() {
            self.check_beat_event(event, &format!("beat.events.{}", i));
        }

        self.check_unique_ids(
            "bass.patterns",
            track.bass.patterns().iter().map(|p| p.id.as_str()),
        );
        self.check_unique_ids(
            "bass.placements",
            track.bass.placements().iter().map(|p| p.id.as_str()),
        );
        self.check_unique_ids("bass.events", track.bass.events().iter().map(|e| e.id.as_str()));
        self.check_unique_ids("beat.events", track.beat.events.iter().map(|e| e.id.as_str()));
    }

    fn check_time_point(&mut self, point: &TimePoint, path: &str, scope: PointScope) {
        let beats_per_bar = self.grid.beats_per_bar();
        let ticks_per_beat = self.grid.ticks_per_beat();

        if !(point.beat >= 0.0 && point.beat < beats_per_bar as f64) {
            self.fail(
                ErrorCode::BeatOutOfRange,
                child(path, "beat"),
                format!("Beat must be between 0 and {}", beats_per_bar as i64 - 1),
            );
        }
        if let Some(tick) = point.tick {
            if tick >= ticks_per_beat {
                self.fail(
                    ErrorCode::TickOutOfRange,
                    child(path, "tick"),
                    format!("Tick must be between 0 and {}", ticks_per_beat as i64 - 1),
                );
            }
        }
        if scope == PointScope::Track && self.grid.point_position(point) >= self.track_length {
            self.fail(
                ErrorCode::TimePointOutOfBounds,
                path,
                "TimePoint exceeds track length",
            );
        }
    }

    fn check_duration(&mut self, duration: &Duration, path: &str) {
        if !duration.has_unit() {
            self.fail(
                ErrorCode::EmptyDuration,
                path,
                "Duration must include at least one unit",
            );
            return;
        }
        let beats_per_bar = self.grid.beats_per_bar();
        let ticks_per_beat = self.grid.ticks_per_beat();

        if let Some(beats) = duration.beats {
            if !(beats >= 0.0 && beats < beats_per_bar as f64) {
                self.fail(
                    ErrorCode::DurationBeatsOutOfRange,
                    child(path, "beats"),
                    format!("Beats must be between 0 and {}", beats_per_bar as i64 - 1),
                );
            }
        }
        if let Some(ticks) = duration.ticks {
            if ticks >= ticks_per_beat {
                self.fail(
                    ErrorCode::DurationTicksOutOfRange,
                    child(path, "ticks"),
                    format!("Ticks must be between 0 and {}", ticks_per_beat as i64 - 1),
                );
            }
        }
        if self.grid.duration_length(duration) <= 0.0 {
            self.fail(
                ErrorCode::DurationNotPositive,
                path,
                "Duration must be positive",
            );
        }
    }

    fn end_position(&self, start: &TimePoint, duration: &Duration) -> f64 {
        self.grid.point_position(start) + self.grid.duration_length(duration)
    }

    fn check_span(&mut self, span: &TimeSpan, path: &str) {
        self.check_time_point(&span.start, &child(path, "start"), PointScope::Track);
        self.check_duration(&span.duration, &child(path, "duration"));
        if self.end_position(&span.start, &span.duration) > self.track_length {
            self.fail(ErrorCode::SpanExceedsTrack, path, "Span exceeds track length");
        }
    }

    fn check_bass_event(&mut self, event: &BassEvent, path: &str) {
        self.check_time_point(&event.start, &child(path, "start"), PointScope::Track);
        self.check_duration(&event.duration, &child(path, "duration"));
        if self.end_position(&event.start, &event.duration) > self.track_length {
            self.fail(
                ErrorCode::EventExceedsTrack,
                path,
                "Bass event exceeds track length",
            );
        }
    }

    fn check_beat_event(&mut self, event: &BeatEvent, path: &str) {
        self.check_time_point(&event.start, &child(path, "start"), PointScope::Track);
    }

    fn check_pattern(&mut self, pattern: &BassPatternDef, path: &str) {
        self.check_duration(&pattern.length, &child(path, "length"));
        let pattern_length = self.grid.duration_length(&pattern.length);

        for (i, event) in pattern.events.iter().enumerate() {
            let event_path = child(&child(path, "events"), i);
            self.check_time_point(&event.start, &child(&event_path, "start"), PointScope::Pattern);
            self.check_duration(&event.duration, &child(&event_path, "duration"));
            if self.end_position(&event.start, &event.duration) > pattern_length {
                self.fail(
                    ErrorCode::EventExceedsPattern,
                    event_path,
                    "Pattern event exceeds pattern length",
                );
            }
        }
    }

    fn check_placement(&mut self, placement: &PatternPlacement, path: &str) {
        self.check_time_point(&placement.start, &child(path, "start"), PointScope::Track);

        let pattern = self.track.bass.pattern(&placement.pattern_id);
        if pattern.is_none() {
            self.fail(
                ErrorCode::UnresolvedPattern,
                child(path, "patternId"),
                "Pattern reference does not resolve",
            );
        }

        let times = placement.times();
        if times < 1 {
            self.fail(
                ErrorCode::InvalidRepeatTimes,
                format!("{}.repeat.times", path),
                "Repeat times must be at least 1",
            );
        }
        if let Some(every) = placement.every() {
            self.check_duration(every, &format!("{}.repeat.every", path));
        }

        let Some(pattern) = pattern else {
            return;
        };
        if times < 1 {
            return;
        }
        let pattern_length = self.grid.duration_length(&pattern.length);
        let every = placement
            .every()
            .map_or(pattern_length, |every| self.grid.duration_length(every))
            .max(0.0);

        // Iteration windows never move backwards, so the last one decides.
        let last_start =
            self.grid.point_position(&placement.start) + (times - 1) as f64 * every;
        if last_start + pattern_length > self.track_length {
            self.fail(
                ErrorCode::PlacementExceedsTrack,
                path,
                "Pattern placement exceeds track length",
            );
        }
    }

    fn check_unique_ids<'a>(&mut self, list_path: &str, ids: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for (i, id) in ids.enumerate() {
            if !seen.insert(id) {
                self.fail(
                    ErrorCode::DuplicateId,
                    format!("{}.{}.id", list_path, i),
                    format!("Duplicate id '{}'", id),
                );
            }
        }
    }
}
