//! Structural (schema) validation over raw JSON.
//!
//! Walks the candidate document in schema order and records every type,
//! presence, enumeration, and range failure with its dot-separated path.
//! Unknown keys are ignored.

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ErrorCode, ValidationError, ValidationErrors};
use crate::track::{
    Accidental, BendCurve, ChordQuality, HarmonyRegion, Instrument, Letter, ModeName, MuteKind,
    RomanNumeral, SectionKind, SlideKind, Technique, TriadQuality,
};

/// Loose absolute-URL shape: scheme, `://`, and a non-empty authority.
const URL_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$";

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("invalid regex pattern"))
}

/// Joins a parent path and a key or index with a dot.
pub(crate) fn child(path: &str, key: impl Display) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn quoted_list(allowed: &[&str]) -> String {
    allowed
        .iter()
        .map(|a| format!("'{}'", a))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Inclusive integer bounds.
#[derive(Debug, Clone, Copy)]
struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    const NON_NEGATIVE: IntRange = IntRange {
        min: 0,
        max: u32::MAX as i64,
    };
    const POSITIVE: IntRange = IntRange {
        min: 1,
        max: u32::MAX as i64,
    };
    const MIDI: IntRange = IntRange { min: 0, max: 127 };
    const PITCH_CLASS: IntRange = IntRange { min: 0, max: 11 };
    const SIGNED: IntRange = IntRange {
        min: i32::MIN as i64,
        max: i32::MAX as i64,
    };
}

/// Bounds for real-valued fields.
#[derive(Debug, Clone, Copy)]
enum NumRange {
    NonNegative,
    Positive,
    UnitInterval,
}

/// Accumulates schema failures for one document.
#[derive(Debug, Default)]
pub(crate) struct SchemaChecker {
    errors: ValidationErrors,
}

impl SchemaChecker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    fn fail(&mut self, code: ErrorCode, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationError::new(code, path, message));
    }

    fn type_error(&mut self, expected: &str, value: &Value, path: &str) {
        self.fail(
            ErrorCode::InvalidType,
            path,
            format!("Expected {}, received {}", expected, type_name(value)),
        );
    }

    // ------------------------------------------------------------------
    // Primitive checks
    // ------------------------------------------------------------------

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.type_error("object", other, path);
                None
            }
        }
    }

    fn array<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v [Value]> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.type_error("array", other, path);
                None
            }
        }
    }

    fn string<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v str> {
        match value {
            Value::String(s) => Some(s),
            other => {
                self.type_error("string", other, path);
                None
            }
        }
    }

    fn integer(&mut self, value: &Value, path: &str, range: IntRange) {
        let Value::Number(number) = value else {
            self.type_error("number", value, path);
            return;
        };
        let parsed = number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX));
        let Some(n) = parsed else {
            self.fail(ErrorCode::InvalidType, path, "Expected integer, received float");
            return;
        };
        if n < range.min {
            let message = if range.min == 1 {
                "Number must be greater than 0".to_string()
            } else {
                format!("Number must be greater than or equal to {}", range.min)
            };
            self.fail(ErrorCode::NumberOutOfRange, path, message);
        } else if n > range.max {
            self.fail(
                ErrorCode::NumberOutOfRange,
                path,
                format!("Number must be less than or equal to {}", range.max),
            );
        }
    }

    fn number(&mut self, value: &Value, path: &str, range: NumRange) {
        let Some(n) = value.as_f64() else {
            self.type_error("number", value, path);
            return;
        };
        match range {
            NumRange::NonNegative if n < 0.0 => self.fail(
                ErrorCode::NumberOutOfRange,
                path,
                "Number must be greater than or equal to 0",
            ),
            NumRange::Positive if n <= 0.0 => self.fail(
                ErrorCode::NumberOutOfRange,
                path,
                "Number must be greater than 0",
            ),
            NumRange::UnitInterval if n < 0.0 => self.fail(
                ErrorCode::NumberOutOfRange,
                path,
                "Number must be greater than or equal to 0",
            ),
            NumRange::UnitInterval if n > 1.0 => self.fail(
                ErrorCode::NumberOutOfRange,
                path,
                "Number must be less than or equal to 1",
            ),
            _ => {}
        }
    }

    fn enumeration(&mut self, value: &Value, path: &str, allowed: &[&str]) {
        match value {
            Value::String(s) if allowed.contains(&s.as_str()) => {}
            Value::String(s) => self.fail(
                ErrorCode::InvalidEnumValue,
                path,
                format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    quoted_list(allowed),
                    s
                ),
            ),
            other => self.fail(
                ErrorCode::InvalidType,
                path,
                format!(
                    "Expected {}, received {}",
                    quoted_list(allowed),
                    type_name(other)
                ),
            ),
        }
    }

    fn url(&mut self, value: &Value, path: &str) {
        if let Some(s) = self.string(value, path) {
            if !url_regex().is_match(s) {
                self.fail(ErrorCode::InvalidFormat, path, "Invalid url");
            }
        }
    }

    // ------------------------------------------------------------------
    // Field access
    // ------------------------------------------------------------------

    fn required<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<(&'v Value, String)> {
        let field_path = child(path, key);
        match obj.get(key) {
            Some(value) => Some((value, field_path)),
            None => {
                self.fail(ErrorCode::MissingField, &field_path, "Required");
                None
            }
        }
    }

    fn optional<'v>(obj: &'v Map<String, Value>, key: &str, path: &str) -> Option<(&'v Value, String)> {
        obj.get(key).map(|value| (value, child(path, key)))
    }

    fn required_string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some((value, p)) = self.required(obj, key, path) {
            self.string(value, &p);
        }
    }

    fn optional_string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some((value, p)) = Self::optional(obj, key, path) {
            self.string(value, &p);
        }
    }

    fn required_int(&mut self, obj: &Map<String, Value>, key: &str, path: &str, range: IntRange) {
        if let Some((value, p)) = self.required(obj, key, path) {
            self.integer(value, &p, range);
        }
    }

    fn optional_int(&mut self, obj: &Map<String, Value>, key: &str, path: &str, range: IntRange) {
        if let Some((value, p)) = Self::optional(obj, key, path) {
            self.integer(value, &p, range);
        }
    }

    fn optional_number(&mut self, obj: &Map<String, Value>, key: &str, path: &str, range: NumRange) {
        if let Some((value, p)) = Self::optional(obj, key, path) {
            self.number(value, &p, range);
        }
    }

    fn required_enum(&mut self, obj: &Map<String, Value>, key: &str, path: &str, allowed: &[&str]) {
        if let Some((value, p)) = self.required(obj, key, path) {
            self.enumeration(value, &p, allowed);
        }
    }

    fn optional_enum(&mut self, obj: &Map<String, Value>, key: &str, path: &str, allowed: &[&str]) {
        if let Some((value, p)) = Self::optional(obj, key, path) {
            self.enumeration(value, &p, allowed);
        }
    }

    fn optional_string_list(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some((value, p)) = Self::optional(obj, key, path) {
            if let Some(items) = self.array(value, &p) {
                for (i, item) in items.iter().enumerate() {
                    self.string(item, &child(&p, i));
                }
            }
        }
    }

    /// Checks every element of a required (or optional) array with `check`.
    fn list(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
        check: fn(&mut Self, &Value, &str),
    ) {
        let field = if required {
            self.required(obj, key, path)
        } else {
            Self::optional(obj, key, path)
        };
        if let Some((value, p)) = field {
            if let Some(items) = self.array(value, &p) {
                for (i, item) in items.iter().enumerate() {
                    check(self, item, &child(&p, i));
                }
            }
        }
    }

    fn nested(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        path: &str,
        required: bool,
        check: fn(&mut Self, &Value, &str),
    ) {
        let field = if required {
            self.required(obj, key, path)
        } else {
            Self::optional(obj, key, path)
        };
        if let Some((value, p)) = field {
            check(self, value, &p);
        }
    }

    // ------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------

    pub(crate) fn check_track(&mut self, value: &Value) {
        let Some(obj) = self.object(value, "") else {
            return;
        };
        let path = "";
        self.required_string(obj, "id", path);
        self.required_string(obj, "title", path);
        self.optional_string(obj, "artist", path);
        self.nested(obj, "source", path, false, Self::check_source);
        self.nested(obj, "timeSignature", path, true, Self::check_time_signature);
        self.required_int(obj, "ticksPerBeat", path, IntRange::POSITIVE);
        self.optional_number(obj, "tempoBpm", path, NumRange::Positive);
        self.required_int(obj, "tonic", path, IntRange::PITCH_CLASS);
        self.optional_int(obj, "tonicMidi", path, IntRange::MIDI);
        self.optional_enum(obj, "mode", path, ModeName::NAMES);
        self.nested(obj, "length", path, true, Self::check_length);
        self.list(obj, "sections", path, true, Self::check_section);
        self.nested(obj, "bass", path, true, Self::check_bass_track);
        self.nested(obj, "beat", path, true, Self::check_beat_track);
        self.nested(obj, "harmony", path, false, Self::check_harmony_track);
        self.list(obj, "annotations", path, false, Self::check_annotation);
    }

    fn check_source(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        if let Some((url, p)) = Self::optional(obj, "url", path) {
            self.url(url, &p);
        }
        self.optional_string(obj, "notes", path);
    }

    fn check_time_signature(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "beatsPerBar", path, IntRange::POSITIVE);
        if let Some((unit, p)) = self.required(obj, "beatUnit", path) {
            let valid = unit
                .as_u64()
                .is_some_and(|u| crate::track::BeatUnit::VALUES.contains(&u));
            if !valid {
                self.fail(
                    ErrorCode::InvalidEnumValue,
                    &p,
                    "Invalid input: expected 4 or 8",
                );
            }
        }
    }

    fn check_length(&mut self, value: &Value, path: &str) {
        if let Some(obj) = self.object(value, path) {
            self.required_int(obj, "bars", path, IntRange::POSITIVE);
        }
    }

    fn check_time_point(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "bar", path, IntRange::NON_NEGATIVE);
        if let Some((beat, p)) = self.required(obj, "beat", path) {
            self.number(beat, &p, NumRange::NonNegative);
        }
        self.optional_int(obj, "tick", path, IntRange::NON_NEGATIVE);
    }

    fn check_duration(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.optional_int(obj, "bars", path, IntRange::NON_NEGATIVE);
        self.optional_number(obj, "beats", path, NumRange::NonNegative);
        self.optional_int(obj, "ticks", path, IntRange::NON_NEGATIVE);
        if !["bars", "beats", "ticks"].iter().any(|k| obj.contains_key(*k)) {
            self.fail(
                ErrorCode::EmptyDuration,
                path,
                "Duration must include at least one unit",
            );
        }
    }

    fn check_time_span(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.nested(obj, "start", path, true, Self::check_time_point);
        self.nested(obj, "duration", path, true, Self::check_duration);
    }

    fn check_section(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_string(obj, "id", path);
        self.required_string(obj, "name", path);
        self.nested(obj, "span", path, true, Self::check_time_span);
        self.optional_enum(obj, "kind", path, SectionKind::NAMES);
    }

    fn check_annotation(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_string(obj, "id", path);
        self.nested(obj, "span", path, true, Self::check_time_span);
        self.required_string(obj, "text", path);
        self.optional_string_list(obj, "tags", path);
    }

    fn check_pitch(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "midi", path, IntRange::MIDI);
        self.nested(obj, "spelling", path, false, Self::check_spelling);
    }

    fn check_spelling(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_enum(obj, "letter", path, Letter::NAMES);
        self.optional_enum(obj, "accidental", path, Accidental::NAMES);
        self.optional_int(obj, "octave", path, IntRange::SIGNED);
    }

    fn check_technique(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        let kind = obj.get("type").and_then(Value::as_str);
        match kind {
            Some("slide") => {
                self.optional_int(obj, "toMidi", path, IntRange::MIDI);
                self.optional_enum(obj, "kind", path, SlideKind::NAMES);
            }
            Some("hammerOn") | Some("pullOff") => {
                self.required_int(obj, "toMidi", path, IntRange::MIDI);
            }
            Some("bend") => {
                self.required_int(obj, "cents", path, IntRange::SIGNED);
                self.optional_enum(obj, "curve", path, BendCurve::NAMES);
            }
            Some("vibrato") => {
                self.optional_int(obj, "depthCents", path, IntRange::SIGNED);
                self.optional_number(obj, "rateHz", path, NumRange::Positive);
            }
            Some("mute") => {
                self.optional_enum(obj, "kind", path, MuteKind::NAMES);
            }
            _ => self.fail(
                ErrorCode::InvalidEnumValue,
                &child(path, "type"),
                format!(
                    "Invalid discriminator value. Expected {}",
                    quoted_list(Technique::TYPES)
                ),
            ),
        }
    }

    fn check_bass_event(&mut self, value: &Value, path: &str) {
        self.check_bass_event_fields(value, path, true);
    }

    fn check_pattern_event(&mut self, value: &Value, path: &str) {
        self.check_bass_event_fields(value, path, false);
    }

    fn check_bass_event_fields(&mut self, value: &Value, path: &str, id_required: bool) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        if id_required {
            self.required_string(obj, "id", path);
        } else {
            self.optional_string(obj, "id", path);
        }
        self.nested(obj, "start", path, true, Self::check_time_point);
        self.nested(obj, "duration", path, true, Self::check_duration);
        self.nested(obj, "pitch", path, true, Self::check_pitch);
        self.optional_number(obj, "velocity", path, NumRange::UnitInterval);
        self.list(obj, "technique", path, false, Self::check_technique);
        self.optional_string_list(obj, "tags", path);
    }

    fn check_pattern_def(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_string(obj, "id", path);
        self.optional_string(obj, "name", path);
        self.nested(obj, "length", path, true, Self::check_duration);
        self.list(obj, "events", path, true, Self::check_pattern_event);
    }

    fn check_placement(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_string(obj, "id", path);
        self.required_string(obj, "patternId", path);
        self.nested(obj, "start", path, true, Self::check_time_point);
        self.nested(obj, "repeat", path, false, Self::check_repeat);
    }

    fn check_repeat(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "times", path, IntRange::POSITIVE);
        self.nested(obj, "every", path, false, Self::check_duration);
    }

    fn check_bass_track(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.list(obj, "patterns", path, false, Self::check_pattern_def);
        self.list(obj, "placements", path, false, Self::check_placement);
        self.list(obj, "events", path, false, Self::check_bass_event);
    }

    fn check_beat_event(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_string(obj, "id", path);
        self.nested(obj, "start", path, true, Self::check_time_point);
        self.required_enum(obj, "instrument", path, Instrument::NAMES);
        self.optional_number(obj, "velocity", path, NumRange::UnitInterval);
    }

    fn check_beat_track(&mut self, value: &Value, path: &str) {
        if let Some(obj) = self.object(value, path) {
            self.list(obj, "events", path, true, Self::check_beat_event);
        }
    }

    fn check_harmony_track(&mut self, value: &Value, path: &str) {
        if let Some(obj) = self.object(value, path) {
            self.list(obj, "regions", path, true, Self::check_harmony_region);
        }
    }

    fn check_harmony_region(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        let data_check: fn(&mut Self, &Value, &str) =
            match obj.get("kind").and_then(Value::as_str) {
                Some("roman") => Self::check_roman_data,
                Some("chord") => Self::check_chord_data,
                Some("tonic") => Self::check_tonic_data,
                _ => {
                    self.fail(
                        ErrorCode::InvalidEnumValue,
                        &child(path, "kind"),
                        format!(
                            "Invalid discriminator value. Expected {}",
                            quoted_list(HarmonyRegion::KINDS)
                        ),
                    );
                    return;
                }
            };
        self.required_string(obj, "id", path);
        self.nested(obj, "span", path, true, Self::check_time_span);
        self.required_string(obj, "label", path);
        self.nested(obj, "data", path, true, data_check);
    }

    fn check_roman_data(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_enum(obj, "numeral", path, RomanNumeral::NAMES);
        self.optional_enum(obj, "quality", path, TriadQuality::NAMES);
        self.optional_string(obj, "inversion", path);
    }

    fn check_chord_data(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "rootPc", path, IntRange::PITCH_CLASS);
        self.required_enum(obj, "quality", path, ChordQuality::NAMES);
        self.optional_string_list(obj, "extensions", path);
    }

    fn check_tonic_data(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        self.required_int(obj, "tonicPc", path, IntRange::PITCH_CLASS);
        self.optional_enum(obj, "mode", path, ModeName::NAMES);
    }
}
