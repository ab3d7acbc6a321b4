//! Loading track documents from disk.

use std::fmt;
use std::path::{Path, PathBuf};

use groove_spec::{validate_track_json, Track, ValidationErrors};

/// Raw contents of a track file.
#[derive(Debug)]
pub struct TrackSource {
    pub path: PathBuf,
    pub text: String,
    /// BLAKE3 hash of the file bytes (hex string).
    pub source_hash: String,
}

impl TrackSource {
    /// Validates the document text.
    pub fn validate(&self) -> Result<Track, ValidationErrors> {
        validate_track_json(&self.text)
    }
}

/// Errors that can occur while loading a track.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File was read but the track is invalid.
    Invalid {
        path: PathBuf,
        errors: ValidationErrors,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::Invalid { path, errors } => {
                write!(f, "{}: {}", path.display(), errors)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Invalid { errors, .. } => Some(errors),
        }
    }
}

/// Reads a track file without interpreting it.
pub fn read_track_source(path: &Path) -> Result<TrackSource, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
    log::debug!("read {} ({} bytes)", path.display(), text.len());
    Ok(TrackSource {
        path: path.to_path_buf(),
        text,
        source_hash,
    })
}

/// Reads and validates a track file.
pub fn load_track(path: &Path) -> Result<Track, InputError> {
    let source = read_track_source(path)?;
    source.validate().map_err(|errors| InputError::Invalid {
        path: path.to_path_buf(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_valid_track() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = Track::draft("draft").to_json().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let track = load_track(file.path()).unwrap();
        assert_eq!(track.id, "draft");

        let source = read_track_source(file.path()).unwrap();
        assert_eq!(source.source_hash.len(), 64);
    }

    #[test]
    fn test_missing_file() {
        let err = load_track(Path::new("/nonexistent/track.json")).unwrap_err();
        assert!(matches!(err, InputError::FileRead { .. }));
        assert!(err.to_string().contains("failed to read file"));
    }

    #[test]
    fn test_invalid_track() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"id\": 3}").unwrap();

        let err = load_track(file.path()).unwrap_err();
        match err {
            InputError::Invalid { errors, .. } => assert!(!errors.is_empty()),
            other => panic!("unexpected error: {}", other),
        }
    }
}
