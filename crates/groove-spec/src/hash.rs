//! Canonical track hashing.
//!
//! A track's identity is the BLAKE3 hash of its RFC 8785 (JCS) canonical
//! JSON form:
//!
//! ```text
//! track_hash = hex(BLAKE3(JCS(track_json)))
//! ```
//!
//! Validation and expansion are pure, so callers can key cached results on
//! this hash.

use serde_json::{Number, Value};

use crate::error::TrackError;
use crate::track::Track;

/// Computes the canonical BLAKE3 hash of a track.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use groove_spec::{canonical_track_hash, Track};
///
/// let hash = canonical_track_hash(&Track::draft("demo")).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_track_hash(track: &Track) -> Result<String, TrackError> {
    let value = track.to_value()?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &Value) -> Result<String, TrackError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys are sorted, there is no insignificant whitespace, integral
/// numbers print without a fraction and strings use minimal escaping.
pub fn canonicalize_json(value: &Value) -> Result<String, TrackError> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<(), TrackError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_jcs_number(n)?),
        Value::String(s) => write_jcs_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        Value::Object(obj) => {
            // JCS orders keys by UTF-16 code units.
            let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn format_jcs_number(n: &Number) -> Result<String, TrackError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n
        .as_f64()
        .ok_or_else(|| TrackError::Canonicalization(format!("unrepresentable number {}", n)))?;
    if !f.is_finite() {
        return Err(TrackError::Canonicalization(format!(
            "non-finite number {}",
            f
        )));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Ok(format!("{}", f as i64));
    }
    // Rust's shortest round-trip formatting matches ECMAScript for the
    // magnitudes tracks carry.
    Ok(format!("{}", f))
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_track_hash() {
        let track = Track::draft("hash-me");
        let hash = canonical_track_hash(&track).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(canonical_track_hash(&track).unwrap(), hash);
    }

    #[test]
    fn test_different_tracks_different_hashes() {
        let a = Track::draft("track-a");
        let b = Track::draft("track-b");
        assert_ne!(
            canonical_track_hash(&a).unwrap(),
            canonical_track_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"b": 1, "a": {"y": [1, 2], "x": null}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a": {"x": null, "y": [1, 2]}, "b": 1}"#).unwrap();
        assert_eq!(canonicalize_json(&a).unwrap(), r#"{"a":{"x":null,"y":[1,2]},"b":1}"#);
        assert_eq!(
            canonical_value_hash(&a).unwrap(),
            canonical_value_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_numbers() {
        let value = json!([0.0, -0.0, 4.0, 1.25, -7, 18446744073709551615u64]);
        assert_eq!(
            canonicalize_json(&value).unwrap(),
            "[0,0,4,1.25,-7,18446744073709551615]"
        );
    }

    #[test]
    fn test_strings() {
        let value = json!({"text": "line\nbreak \"quoted\" \u{1} ♮"});
        assert_eq!(
            canonicalize_json(&value).unwrap(),
            "{\"text\":\"line\\nbreak \\\"quoted\\\" \\u0001 ♮\"}"
        );
    }

    #[test]
    fn test_integral_beat_and_float_beat_hash_equal() {
        let a = json!({"bar": 1, "beat": 2});
        let b = json!({"bar": 1, "beat": 2.0});
        assert_eq!(
            canonical_value_hash(&a).unwrap(),
            canonical_value_hash(&b).unwrap()
        );
    }
}
