//! Validation tests.

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::error::ValidationPhase;

fn make_valid_track() -> Value {
    json!({
        "id": "test-groove",
        "title": "Test Groove",
        "artist": "Session Player",
        "timeSignature": {"beatsPerBar": 4, "beatUnit": 4},
        "ticksPerBeat": 240,
        "tempoBpm": 96,
        "tonic": 4,
        "mode": "dorian",
        "length": {"bars": 8},
        "sections": [
            {
                "id": "verse",
                "name": "Verse",
                "kind": "verse",
                "span": {"start": {"bar": 0, "beat": 0}, "duration": {"bars": 8}}
            }
        ],
        "bass": {
            "patterns": [
                {
                    "id": "pat-a",
                    "length": {"bars": 2},
                    "events": [
                        {
                            "start": {"bar": 0, "beat": 0},
                            "duration": {"beats": 1},
                            "pitch": {"midi": 40}
                        },
                        {
                            "start": {"bar": 0, "beat": 2},
                            "duration": {"beats": 1},
                            "pitch": {"midi": 43}
                        }
                    ]
                }
            ],
            "placements": [
                {
                    "id": "place-a",
                    "patternId": "pat-a",
                    "start": {"bar": 0, "beat": 0},
                    "repeat": {"times": 4}
                }
            ],
            "events": [
                {
                    "id": "lit-1",
                    "start": {"bar": 1, "beat": 0},
                    "duration": {"beats": 1},
                    "pitch": {"midi": 45}
                }
            ]
        },
        "beat": {
            "events": [
                {"id": "k1", "start": {"bar": 0, "beat": 0}, "instrument": "kick"},
                {"id": "s1", "start": {"bar": 0, "beat": 1}, "instrument": "snare", "velocity": 0.8}
            ]
        }
    })
}

fn errors_of(value: &Value) -> ValidationErrors {
    validate_track(value).expect_err("expected validation to fail")
}

#[test]
fn test_valid_track() {
    let track = validate_track(&make_valid_track()).unwrap();
    assert_eq!(track.id, "test-groove");
    assert_eq!(track.length_ticks(), 8 * 960);
    assert_eq!(track.bass.patterns().len(), 1);
}

#[test]
fn test_draft_is_valid() {
    let value = Track::draft("draft").to_value().unwrap();
    assert!(validate_track(&value).is_ok());
}

#[test]
fn test_empty_duration_fails() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["duration"] = json!({});
    let errors = errors_of(&value);
    assert!(errors.contains(ErrorCode::EmptyDuration, "bass.events.0.duration"));
    assert_eq!(
        errors[0].message,
        "Duration must include at least one unit"
    );
}

#[test]
fn test_unresolved_pattern_reports_pattern_id_path() {
    let mut value = make_valid_track();
    value["bass"]["placements"][0]["patternId"] = json!("pat-missing");
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::UnresolvedPattern);
    assert_eq!(errors[0].path, "bass.placements.0.patternId");
    assert_eq!(errors[0].message, "Pattern reference does not resolve");
}

#[test]
fn test_pattern_event_exceeds_pattern_length() {
    let mut value = make_valid_track();
    value["bass"]["patterns"][0]["length"] = json!({"bars": 1});
    value["bass"]["patterns"][0]["events"] = json!([
        {
            "start": {"bar": 0, "beat": 3},
            "duration": {"beats": 2},
            "pitch": {"midi": 40}
        }
    ]);
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::EventExceedsPattern);
    assert_eq!(errors[0].path, "bass.patterns.0.events.0");
    assert_eq!(errors[0].message, "Pattern event exceeds pattern length");
}

#[test]
fn test_pattern_events_are_not_bounded_by_track_length() {
    let mut value = make_valid_track();
    value["length"] = json!({"bars": 2});
    value["sections"][0]["span"]["duration"] = json!({"bars": 2});
    value["bass"]["placements"] = json!([]);
    value["bass"]["events"] = json!([]);
    value["bass"]["patterns"][0]["length"] = json!({"bars": 4});
    value["bass"]["patterns"][0]["events"][0]["start"] = json!({"bar": 3, "beat": 0});
    assert!(validate_track(&value).is_ok());
}

#[test]
fn test_semantic_errors_accumulate() {
    let mut value = make_valid_track();
    // Three independent violations.
    value["beat"]["events"][0]["start"] = json!({"bar": 0, "beat": 4});
    value["bass"]["events"][0]["start"] = json!({"bar": 1, "beat": 0, "tick": 240});
    value["sections"][0]["span"]["duration"] = json!({"bars": 9});

    let errors = errors_of(&value);
    assert_eq!(errors.len(), 3, "errors: {}", errors);
    assert_eq!(errors.phase(), Some(ValidationPhase::Semantic));
    assert!(errors.contains(ErrorCode::SpanExceedsTrack, "sections.0.span"));
    assert!(errors.contains(ErrorCode::TickOutOfRange, "bass.events.0.start.tick"));
    assert!(errors.contains(ErrorCode::BeatOutOfRange, "beat.events.0.start.beat"));
}

#[test]
fn test_out_of_range_messages() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["start"] = json!({"bar": 1, "beat": 5});
    value["bass"]["events"][0]["duration"] = json!({"beats": 4, "ticks": 300});
    let errors = errors_of(&value);
    let messages: Vec<(&str, &str)> = errors
        .iter()
        .map(|e| (e.path.as_str(), e.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            ("bass.events.0.start.beat", "Beat must be between 0 and 3"),
            ("bass.events.0.duration.beats", "Beats must be between 0 and 3"),
            ("bass.events.0.duration.ticks", "Ticks must be between 0 and 239"),
        ]
    );
}

#[test]
fn test_time_point_past_track_end() {
    let mut value = make_valid_track();
    value["beat"]["events"][1]["start"] = json!({"bar": 8, "beat": 0});
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "beat.events.1.start");
    assert_eq!(errors[0].message, "TimePoint exceeds track length");
}

#[test]
fn test_bass_event_end_past_track_end() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["start"] = json!({"bar": 7, "beat": 3});
    value["bass"]["events"][0]["duration"] = json!({"beats": 2});
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::EventExceedsTrack);
    assert_eq!(errors[0].path, "bass.events.0");
}

#[test]
fn test_zero_duration_is_not_positive() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["duration"] = json!({"ticks": 0});
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::DurationNotPositive);
    assert_eq!(errors[0].message, "Duration must be positive");
}

#[test]
fn test_placement_overflow_reported_once() {
    let mut value = make_valid_track();
    value["bass"]["placements"][0]["repeat"] = json!({"times": 7});
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::PlacementExceedsTrack);
    assert_eq!(errors[0].path, "bass.placements.0");
    assert_eq!(errors[0].message, "Pattern placement exceeds track length");
}

#[test]
fn test_placement_every_shortens_window() {
    let mut value = make_valid_track();
    // 7 repeats every bar: last window starts at bar 6 and ends at bar 8.
    value["bass"]["placements"][0]["repeat"] = json!({"times": 7, "every": {"bars": 1}});
    assert!(validate_track(&value).is_ok());

    value["bass"]["placements"][0]["repeat"]["times"] = json!(8);
    let errors = errors_of(&value);
    assert!(errors.contains(ErrorCode::PlacementExceedsTrack, "bass.placements.0"));
}

#[test]
fn test_huge_repeat_count_is_checked_in_constant_time() {
    let mut value = make_valid_track();
    value["bass"]["patterns"][0]["length"] = json!({"ticks": 0});
    value["bass"]["patterns"][0]["events"] = json!([]);
    value["bass"]["placements"][0]["repeat"] = json!({"times": 4_000_000_000u64});

    let started = std::time::Instant::now();
    let errors = errors_of(&value);
    assert!(started.elapsed() < std::time::Duration::from_secs(1));

    assert_eq!(errors.len(), 1);
    assert!(errors.contains(ErrorCode::DurationNotPositive, "bass.patterns.0.length"));
}

#[test]
fn test_huge_repeat_count_overflowing_track_reported_once() {
    let mut value = make_valid_track();
    value["bass"]["placements"][0]["repeat"] =
        json!({"times": 4_000_000_000u64, "every": {"ticks": 1}});

    let started = std::time::Instant::now();
    let errors = errors_of(&value);
    assert!(started.elapsed() < std::time::Duration::from_secs(1));

    assert_eq!(errors.len(), 1);
    assert!(errors.contains(ErrorCode::PlacementExceedsTrack, "bass.placements.0"));
}

#[test]
fn test_invalid_repeat_every_duration() {
    let mut value = make_valid_track();
    value["bass"]["placements"][0]["repeat"] = json!({"times": 2, "every": {"beats": 6}});
    let errors = errors_of(&value);
    assert!(errors.contains(
        ErrorCode::DurationBeatsOutOfRange,
        "bass.placements.0.repeat.every.beats"
    ));
}

#[test]
fn test_duplicate_ids() {
    let mut value = make_valid_track();
    value["beat"]["events"][1]["id"] = json!("k1");
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::DuplicateId);
    assert_eq!(errors[0].path, "beat.events.1.id");
    assert_eq!(errors[0].message, "Duplicate id 'k1'");
}

#[test]
fn test_structural_failure_skips_semantic_phase() {
    let mut value = make_valid_track();
    value["bass"]["placements"][0]["patternId"] = json!("pat-missing");
    value["bass"]["events"][0]["pitch"]["midi"] = json!(200);
    value["beat"]["events"][0]["instrument"] = json!("hat");

    let errors = errors_of(&value);
    assert_eq!(errors.phase(), Some(ValidationPhase::Structural));
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(ErrorCode::NumberOutOfRange, "bass.events.0.pitch.midi"));
    assert!(errors.contains(ErrorCode::InvalidEnumValue, "beat.events.0.instrument"));
}

#[test]
fn test_integer_fields_reject_floats() {
    let mut value = make_valid_track();
    value["ticksPerBeat"] = json!(240.0);
    let errors = errors_of(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "ticksPerBeat");
    assert_eq!(errors[0].message, "Expected integer, received float");
}

#[test]
fn test_fractional_beats_are_accepted() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["start"] = json!({"bar": 1, "beat": 1.25});
    value["bass"]["events"][0]["duration"] = json!({"beats": 0.25});
    let track = validate_track(&value).unwrap();
    assert_eq!(track.bass.events()[0].start.beat, 1.25);
}

#[test]
fn test_fractional_beat_just_before_track_end() {
    let mut value = make_valid_track();
    value["length"] = json!({"bars": 1});
    value["sections"][0]["span"]["duration"] = json!({"bars": 1});
    value["bass"]["placements"] = json!([]);
    value["bass"]["events"] = json!([]);
    value["beat"]["events"][0]["start"] = json!({"bar": 0, "beat": 3.999});
    assert!(validate_track(&value).is_ok());

    value["beat"]["events"][0]["start"] = json!({"bar": 1, "beat": 0});
    let errors = errors_of(&value);
    assert!(errors.contains(ErrorCode::TimePointOutOfBounds, "beat.events.0.start"));
}

#[test]
fn test_fractional_event_end_compared_unrounded() {
    let mut value = make_valid_track();
    // Starts at 7679.52 and ends at 7679.76 of 7680 ticks.
    value["bass"]["events"][0]["start"] = json!({"bar": 7, "beat": 3.998});
    value["bass"]["events"][0]["duration"] = json!({"beats": 0.001});
    assert!(validate_track(&value).is_ok());

    value["bass"]["events"][0]["duration"] = json!({"beats": 0.003});
    let errors = errors_of(&value);
    assert!(errors.contains(ErrorCode::EventExceedsTrack, "bass.events.0"));
}

#[test]
fn test_tiny_fractional_duration_is_positive() {
    let mut value = make_valid_track();
    value["bass"]["events"][0]["duration"] = json!({"beats": 0.001});
    assert!(validate_track(&value).is_ok());
}

#[test]
fn test_validate_track_json_syntax_error() {
    let errors = validate_track_json("{ not json").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::MalformedDocument);
    assert_eq!(errors[0].path, "");
    assert!(errors[0].message.starts_with("Invalid JSON"));
}

#[test]
fn test_validate_track_json_valid() {
    let text = serde_json::to_string(&make_valid_track()).unwrap();
    let track = validate_track_json(&text).unwrap();
    assert_eq!(track.title, "Test Groove");
}

#[test]
fn test_check_semantics_on_built_track() {
    let mut track = Track::draft("draft");
    track.sections[0].span.duration = crate::track::Duration::bars(2);
    let errors = check_semantics(&track);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "sections.0.span");
}

#[test]
fn test_validation_is_total_on_odd_inputs() {
    for value in [
        json!(null),
        json!(42),
        json!("track"),
        json!([]),
        json!({"timeSignature": {"beatsPerBar": 0, "beatUnit": 4}}),
    ] {
        let errors = errors_of(&value);
        assert!(!errors.is_empty());
    }
}
