//! Discogs API Data Transfer Objects
//!
//! These types match EXACTLY what the Discogs API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the discogs module - convert to domain types.
//!
//! API Reference: https://www.discogs.com/developers#page:database,header:database-search
//!
//! We use the /database/search endpoint with a barcode query. The `title`
//! field combines artist and album as `"<artist> - <album>"`.

use serde::{Deserialize, Serialize};

/// Barcode search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Matching releases; empty when the barcode is unknown
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    /// Combined "<artist> - <album>" title
    pub title: String,
    /// Release year (Discogs reports this as a string)
    #[serde(default)]
    pub year: String,
    /// Genres, possibly absent
    #[serde(default)]
    pub genre: Option<Vec<String>>,
    /// Link to the master release
    pub master_url: Option<String>,
    /// Cover image URL
    pub cover_image: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_result() {
        let json = r#"{
            "results": [{
                "title": "Daft Punk - Discovery",
                "year": "2001",
                "genre": ["Electronic"],
                "master_url": "https://api.discogs.com/masters/3936",
                "cover_image": "https://i.discogs.com/cover.jpg",
                "country": "Europe",
                "format": ["CD", "Album"]
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search response");

        assert_eq!(response.results.len(), 1);
        let result = &response.results[0];
        assert_eq!(result.title, "Daft Punk - Discovery");
        assert_eq!(result.year, "2001");
        assert_eq!(result.genre, Some(vec!["Electronic".to_string()]));
        assert_eq!(
            result.master_url.as_deref(),
            Some("https://api.discogs.com/masters/3936")
        );
    }

    #[test]
    fn test_parse_empty_results() {
        let json = r#"{"results": []}"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse empty response");

        assert!(response.results.is_empty());
    }

    #[test]
    fn test_parse_minimal_result() {
        // Some releases have no year, genre, or master release
        let json = r#"{
            "results": [{
                "title": "Some Artist - Some Album",
                "master_url": null,
                "cover_image": null
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse minimal result");

        let result = &response.results[0];
        assert_eq!(result.year, "");
        assert!(result.genre.is_none());
        assert!(result.master_url.is_none());
        assert!(result.cover_image.is_none());
    }

    #[test]
    fn test_parse_missing_results_field() {
        let response: SearchResponse =
            serde_json::from_str("{}").expect("Should tolerate missing results");
        assert!(response.results.is_empty());
    }
}
