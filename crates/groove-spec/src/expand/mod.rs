//! Pattern expansion.
//!
//! Flattens the bass layer (pattern placements plus literal events) and the
//! beat layer into one time-sorted, globally identified event list each.
//! Instantiated pattern events are identified as `{placement}:{iteration}:{index}`.
//!
//! Expansion is defined for validated tracks. On anything else it degrades
//! quietly: placements whose pattern cannot be resolved are skipped.


use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::time::{Ticks, TimeGrid};
use crate::track::{BassEvent, BassPatternDef, BeatEvent, PatternPlacement, TimePoint, Track};

/// Both expanded layers of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedTrack {
    pub bass: Vec<BassEvent>,
    pub beat: Vec<BeatEvent>,
}

/// Expands both layers of a track.
///
/// # Example
/// ```
/// use groove_spec::{expand_track, Track};
///
/// let expanded = expand_track(&Track::draft("demo"));
/// assert!(expanded.bass.is_empty());
/// assert!(expanded.beat.is_empty());
/// ```
pub fn expand_track(track: &Track) -> ExpandedTrack {
    ExpandedTrack {
        bass: expand_bass_events(track),
        beat: expand_beat_events(track),
    }
}

/// Instantiates every placement and merges the literal bass events.
///
/// The result is ordered by absolute tick, ties broken by id.
pub fn expand_bass_events(track: &Track) -> Vec<BassEvent> {
    let grid = track.grid();
    let patterns: HashMap<&str, &BassPatternDef> = track
        .bass
        .patterns()
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    let mut events: Vec<(Ticks, BassEvent)> = Vec::new();

    for placement in track.bass.placements() {
        let Some(pattern) = patterns.get(placement.pattern_id.as_str()) else {
            log::warn!(
                "placement '{}' references unknown pattern '{}'; skipping",
                placement.id,
                placement.pattern_id
            );
            continue;
        };
        instantiate_placement(&grid, placement, pattern, &mut events);
    }

    events.extend(
        track
            .bass
            .events()
            .iter()
            .map(|e| (grid.point_to_ticks(&e.start), e.clone())),
    );

    sort_by_time(&mut events, |e| &e.id);
    log::debug!("expanded {} bass event(s) for '{}'", events.len(), track.id);
    events.into_iter().map(|(_, e)| e).collect()
}

/// Literal beat events, ordered by absolute tick, ties broken by id.
pub fn expand_beat_events(track: &Track) -> Vec<BeatEvent> {
    let grid = track.grid();
    let mut events: Vec<(Ticks, BeatEvent)> = track
        .beat
        .events
        .iter()
        .map(|e| (grid.point_to_ticks(&e.start), e.clone()))
        .collect();

    sort_by_time(&mut events, |e| &e.id);
    events.into_iter().map(|(_, e)| e).collect()
}

fn instantiate_placement(
    grid: &TimeGrid,
    placement: &PatternPlacement,
    pattern: &BassPatternDef,
    out: &mut Vec<(Ticks, BassEvent)>,
) {
    let pattern_length_ticks = grid.duration_to_ticks(&pattern.length);
    let every_ticks = placement
        .every()
        .map_or(pattern_length_ticks, |every| grid.duration_to_ticks(every));
    let placement_ticks = grid.point_to_ticks(&placement.start);

    for i in 0..placement.times() {
        let iteration_ticks =
            placement_ticks.saturating_add((i as Ticks).saturating_mul(every_ticks));
        for (j, event) in pattern.events.iter().enumerate() {
            let start_ticks = iteration_ticks.saturating_add(grid.point_to_ticks(&event.start));
            let start: TimePoint = grid.ticks_to_point(start_ticks);
            let id = format!("{}:{}:{}", placement.id, i, j);
            out.push((start_ticks, event.instantiate(id, start)));
        }
    }
}

/// Stable sort on `(ticks, id)`.
fn sort_by_time<T>(events: &mut [(Ticks, T)], id: impl Fn(&T) -> &String) {
    events.sort_by(|(a_ticks, a), (b_ticks, b)| {
        a_ticks.cmp(b_ticks).then_with(|| id(a).cmp(id(b)))
    });
}
