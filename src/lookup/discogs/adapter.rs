//! Adapter layer: Convert Discogs DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Discogs changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::lookup::domain::{DiscogsAlbum, LookupError};

/// Convert a Discogs search result to a domain album candidate.
///
/// The combined `title` field is split on the FIRST hyphen into artist and
/// album name, trimming whitespace on both sides. A title with no hyphen is
/// a parsing failure, not a "not found" - the API contract promises the
/// combined form.
pub fn to_album(result: dto::SearchResult) -> Result<DiscogsAlbum, LookupError> {
    let (artist, name) = split_title(&result.title)?;

    // Empty genre lists normalize to None: absence is represented as null,
    // never as an empty sequence.
    let genres = result.genre.filter(|g| !g.is_empty());

    Ok(DiscogsAlbum {
        artist,
        name,
        year: result.year,
        genres,
        url: result.master_url,
        cover_image: result.cover_image,
    })
}

/// Split a combined `"<artist> - <album>"` title.
fn split_title(title: &str) -> Result<(String, String), LookupError> {
    let Some((artist, name)) = title.split_once('-') else {
        return Err(LookupError::Parse(format!(
            "Discogs title {title:?} is not in \"<artist> - <album>\" form"
        )));
    };
    Ok((artist.trim().to_string(), name.trim().to_string()))
}
