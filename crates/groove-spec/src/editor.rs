//! Sixteenth-note step grid used by note editors, and track export.
//!
//! The grid assumes 4/4: four steps per beat, sixteen per bar. Notes are
//! entered in the bass register B0..=C5.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::time::TimeGrid;
use crate::track::{
    BassEvent, BassTrack, BeatTrack, Duration, Pitch, Section, TimePoint, TimeSignature,
    TimeSpan, Track, TrackLength, DEFAULT_TICKS_PER_BEAT,
};

pub const STEPS_PER_BEAT: u32 = 4;
pub const STEPS_PER_BAR: u32 = 16;

/// Lowest enterable note (B0).
pub const MIN_MIDI: u8 = 23;
/// Highest enterable note (C5).
pub const MAX_MIDI: u8 = 72;

const SLUG_SEPARATOR_PATTERN: &str = r"[^a-z0-9]+";

static SLUG_SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn slug_separator_regex() -> &'static Regex {
    SLUG_SEPARATOR_REGEX
        .get_or_init(|| Regex::new(SLUG_SEPARATOR_PATTERN).expect("invalid regex pattern"))
}

/// A note on the step grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepNote {
    pub id: String,
    pub start_step: u32,
    /// Length in steps (at least 1).
    pub length: u32,
    pub midi: u8,
}

impl StepNote {
    pub fn new(id: impl Into<String>, start_step: u32, length: u32, midi: u8) -> Self {
        Self {
            id: id.into(),
            start_step,
            length,
            midi,
        }
    }

    /// First step after the note.
    pub fn end_step(&self) -> u32 {
        self.start_step.saturating_add(self.length)
    }
}

/// MIDI note number of pitch class `pc` in `octave` (C4 = 60).
pub fn to_midi(pc: u8, octave: i32) -> i32 {
    (octave + 1) * 12 + pc as i32
}

/// `midi` if it lies in the editor register, otherwise `None`.
pub fn clamp_midi(midi: i32) -> Option<u8> {
    if midi < MIN_MIDI as i32 || midi > MAX_MIDI as i32 {
        None
    } else {
        u8::try_from(midi).ok()
    }
}

/// Pitch for a pitch-class key press relative to the tonic's octave,
/// shifted one octave down or up.
pub fn compute_note_midi(pc: u8, tonic_midi: u8, octave_shift: i32) -> Option<u8> {
    let base_octave = (tonic_midi / 12) as i32 - 1;
    clamp_midi(to_midi(pc, base_octave + octave_shift))
}

/// Note covering `step`, if any.
pub fn find_note_at_step(notes: &[StepNote], step: u32) -> Option<&StepNote> {
    notes
        .iter()
        .find(|note| step >= note.start_step && step < note.end_step())
}

/// Drops every note that intersects `[start, start + length)`.
pub fn remove_overlapping_notes(notes: &[StepNote], start: u32, length: u32) -> Vec<StepNote> {
    let end = start.saturating_add(length);
    notes
        .iter()
        .filter(|note| !(start < note.end_step() && end > note.start_step))
        .cloned()
        .collect()
}

/// Converts grid notes to literal bass events `note-1..note-N`, ordered by
/// start step.
pub fn bass_events_from_steps(notes: &[StepNote]) -> Vec<BassEvent> {
    let mut sorted: Vec<&StepNote> = notes.iter().collect();
    sorted.sort_by_key(|note| note.start_step);

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, note)| {
            let start = TimePoint::new(
                note.start_step / STEPS_PER_BAR,
                (note.start_step % STEPS_PER_BAR) as f64 / STEPS_PER_BEAT as f64,
            );
            let duration = step_length_duration(note.length);
            BassEvent::new(
                format!("note-{}", index + 1),
                start,
                duration,
                Pitch::midi(note.midi),
            )
        })
        .collect()
}

/// Length in steps as whole bars plus the remaining beats, so `beats` stays
/// below one bar.
fn step_length_duration(length: u32) -> Duration {
    let bars = length / STEPS_PER_BAR;
    let remainder = length % STEPS_PER_BAR;
    if bars == 0 {
        return Duration::beats(remainder as f64 / STEPS_PER_BEAT as f64);
    }
    Duration {
        bars: Some(bars),
        beats: (remainder > 0).then(|| remainder as f64 / STEPS_PER_BEAT as f64),
        ticks: None,
    }
}

/// Projects bass events onto the step grid, ordered by start step.
///
/// Starts snap down to their step; lengths round to the nearest step and
/// are at least one step.
pub fn step_notes_from_events(grid: &TimeGrid, events: &[BassEvent]) -> Vec<StepNote> {
    let ticks_per_step = grid.ticks_per_beat().max(1) as f64 / STEPS_PER_BEAT as f64;

    let mut notes: Vec<StepNote> = events
        .iter()
        .map(|event| {
            let start_ticks = grid.point_to_ticks(&event.start) as f64;
            let length_ticks = grid.duration_to_ticks(&event.duration) as f64;
            StepNote {
                id: event.id.clone(),
                start_step: (start_ticks / ticks_per_step).floor() as u32,
                length: ((length_ticks / ticks_per_step).round() as u32).max(1),
                midi: event.pitch.midi,
            }
        })
        .collect();
    notes.sort_by_key(|note| note.start_step);
    notes
}

/// Lowercase, dash-separated file-name slug. Empty slugs become `untitled`.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let replaced = slug_separator_regex().replace_all(lowered.trim(), "-");
    let slug = replaced.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

/// `<artist-slug>--<title-slug>`, with blank inputs replaced by
/// `unknown-artist` and `untitled`.
pub fn export_track_id(artist: &str, title: &str) -> String {
    let artist = if artist.is_empty() { "unknown-artist" } else { artist };
    let title = if title.is_empty() { "untitled" } else { title };
    format!("{}--{}", slugify(artist), slugify(title))
}

/// Editor state that becomes a track on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackExport {
    pub title: String,
    pub artist: String,
    /// Tonic pitch class (0-11).
    pub tonic_pc: u8,
    pub tonic_octave: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_bpm: Option<f64>,
    /// Number of 4/4 bars.
    pub measures: u32,
    pub notes: Vec<StepNote>,
}

impl TrackExport {
    /// Tonic register anchor, falling back to the lowest enterable note.
    pub fn tonic_midi(&self) -> u8 {
        clamp_midi(to_midi(self.tonic_pc, self.tonic_octave)).unwrap_or(MIN_MIDI)
    }

    /// Suggested file name for the exported document.
    pub fn file_name(&self) -> String {
        format!("{}.json", export_track_id(&self.artist, &self.title))
    }

    /// Builds the exported track: one section spanning every bar, literal
    /// bass events from the grid, and an empty beat layer.
    pub fn to_track(&self) -> Track {
        let measures = self.measures.max(1);
        Track {
            id: export_track_id(&self.artist, &self.title),
            title: if self.title.is_empty() {
                "Untitled Track".to_string()
            } else {
                self.title.clone()
            },
            artist: (!self.artist.is_empty()).then(|| self.artist.clone()),
            source: None,
            time_signature: TimeSignature::common(),
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
            tempo_bpm: self.tempo_bpm.filter(|bpm| *bpm > 0.0),
            tonic: self.tonic_pc % 12,
            tonic_midi: Some(self.tonic_midi()),
            mode: None,
            length: TrackLength { bars: measures },
            sections: vec![Section {
                id: "section-1".to_string(),
                name: "Section 1".to_string(),
                span: TimeSpan::new(TimePoint::new(0, 0.0), Duration::bars(measures)),
                kind: None,
            }],
            bass: BassTrack {
                events: Some(bass_events_from_steps(&self.notes)),
                ..BassTrack::default()
            },
            beat: BeatTrack::default(),
            harmony: None,
            annotations: None,
        }
    }
}
