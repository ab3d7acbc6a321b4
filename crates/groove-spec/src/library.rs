//! Track library index model.
//!
//! A library is a directory (or static site) holding `index.json` plus the
//! track documents it lists. Fetching is left to the caller; this module only
//! models the index and derives URLs.

use serde::{Deserialize, Serialize};

use crate::track::{ModeName, Track};

/// Public library used when no base URL is configured.
pub const DEFAULT_LIBRARY_BASE_URL: &str =
    "https://raw.githubusercontent.com/dvail/groove-strata-library/main";

/// File name of the index at the library root.
pub const INDEX_FILE_NAME: &str = "index.json";

/// The library index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackIndex {
    /// Generation timestamp, as written by the indexer.
    pub generated_at: String,
    pub track_count: usize,
    pub tracks: Vec<TrackIndexEntry>,
}

/// Summary of one track in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackIndexEntry {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub tonic: Option<u8>,
    pub tonic_midi: Option<u8>,
    pub mode: Option<ModeName>,
    pub tempo_bpm: Option<f64>,
    pub length_bars: Option<u32>,
    /// Document path relative to the library root.
    pub path: String,
}

impl TrackIndexEntry {
    /// Index entry summarizing `track`, stored at `path`.
    pub fn from_track(track: &Track, path: impl Into<String>) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone().unwrap_or_default(),
            tonic: Some(track.tonic),
            tonic_midi: track.tonic_midi,
            mode: track.mode,
            tempo_bpm: track.tempo_bpm,
            length_bars: Some(track.length.bars),
            path: path.into(),
        }
    }
}

impl TrackIndex {
    /// Parses an index document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Entry with the given track id.
    pub fn entry(&self, id: &str) -> Option<&TrackIndexEntry> {
        self.tracks.iter().find(|entry| entry.id == id)
    }
}

/// URL of the index for a library rooted at `base_url`.
pub fn index_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), INDEX_FILE_NAME)
}

/// URL of a track document listed at `path`.
pub fn track_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
