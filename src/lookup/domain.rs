//! Internal domain models for barcode-to-album resolution.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

/// A candidate album returned by the Discogs barcode search.
///
/// Transient lookup result - never persisted directly. The orchestrator
/// combines it with a Spotify id to build an [`Album`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscogsAlbum {
    /// Artist name as credited by Discogs (may carry a "(2)" suffix)
    pub artist: String,
    /// Album title
    pub name: String,
    /// Release year as reported by Discogs
    pub year: String,
    /// Genres, when reported; `Some` is always non-empty
    pub genres: Option<Vec<String>>,
    /// Link to the Discogs master release
    pub url: Option<String>,
    /// Cover image URL
    pub cover_image: Option<String>,
}

/// A Spotify album identifier - always exactly 22 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpotifyAlbumId(String);

/// Length of every Spotify album id.
pub const SPOTIFY_ID_LEN: usize = 22;

impl SpotifyAlbumId {
    /// Parse an id from an API response or the database.
    ///
    /// Surrounding whitespace is stripped; anything that isn't exactly
    /// 22 characters afterwards is a contract violation.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() != SPOTIFY_ID_LEN {
            return Err(LookupError::ContractViolation {
                expected: format!("{SPOTIFY_ID_LEN}-character Spotify album id"),
                actual: format!("{:?} ({} chars)", trimmed, trimmed.chars().count()),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpotifyAlbumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully resolved album - the record cached in the database.
///
/// Only ever constructed after BOTH the Discogs candidate and the Spotify
/// id have been resolved; a partially resolved album is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    /// Product barcode - the unique cache key
    pub barcode: String,
    /// Artist name, cleaned of numeric disambiguation suffixes
    pub artist: String,
    /// Album title
    pub name: String,
    /// Release year
    pub year: String,
    /// Genres, when reported; `Some` is always non-empty
    pub genres: Option<Vec<String>>,
    /// Canonical Spotify album id
    pub spotify_id: SpotifyAlbumId,
    /// Link to the Discogs master release
    pub discogs_url: Option<String>,
    /// Cover image URL
    pub cover_image_url: Option<String>,
    /// Refreshed on every write to this barcode
    pub last_update: DateTime<Utc>,
    /// Soft-delete marker; present in the schema but never set by the
    /// lookup flow
    pub is_deleted: bool,
}

/// Errors that can occur while resolving a barcode.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no Discogs album found for barcode {barcode}")]
    NoDiscogsAlbum { barcode: String },

    #[error("no Spotify album found for {artist} - {album}")]
    NoSpotifyAlbum { artist: String, album: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("API request failed with HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("API contract violation: expected {expected}, got {actual}")]
    ContractViolation { expected: String, actual: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LookupError {
    /// True for the domain "not found" outcomes, as opposed to upstream
    /// transport or protocol failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LookupError::NoDiscogsAlbum { .. } | LookupError::NoSpotifyAlbum { .. }
        )
    }
}

/// Matches Discogs' numeric disambiguation suffixes, e.g. "Artist (2)".
static DISAMBIGUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("disambiguation regex is valid"));

/// Strip Discogs disambiguation tokens from an artist name.
///
/// Removes every `(<digits>)` token and trims surrounding whitespace.
/// Interior whitespace is left alone, so `"A (12) B (3)"` becomes `"A  B"`.
pub fn clean_artist(raw: &str) -> String {
    DISAMBIGUATION.replace_all(raw, "").trim().to_string()
}
