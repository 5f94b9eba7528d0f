//! Spotify Web API Data Transfer Objects
//!
//! These types match EXACTLY what the Spotify API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! We use two endpoints: the client-credentials token exchange and the
//! /v1/search endpoint filtered to albums.

use serde::{Deserialize, Serialize};

/// Client-credentials token exchange response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent API calls
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: Option<String>,
    /// Lifetime in seconds (unused - see the client's token cache notes)
    pub expires_in: Option<u64>,
}

/// Album search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub albums: AlbumPage,
}

/// One page of album results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumPage {
    /// Matching albums; empty when nothing matched
    #[serde(default)]
    pub items: Vec<AlbumItem>,
}

/// A single album in a search page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumItem {
    /// Spotify album id (22 characters)
    pub id: String,
    /// Album title
    pub name: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
