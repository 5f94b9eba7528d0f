//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use crate::lookup::traits::DiscogsApi;
//!
//! // In production code:
//! async fn resolve<T: DiscogsApi>(client: &T, barcode: &str) {
//!     let candidates = client.search(barcode).await?;
//! }
//!
//! // In tests:
//! struct MockDiscogs { ... }
//! impl DiscogsApi for MockDiscogs { ... }
//! ```

use async_trait::async_trait;

use super::domain::{DiscogsAlbum, LookupError, SpotifyAlbumId};

/// Trait for the Discogs barcode search.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait DiscogsApi: Send + Sync {
    /// Search releases by barcode; empty vec means no match.
    async fn search(&self, barcode: &str) -> Result<Vec<DiscogsAlbum>, LookupError>;
}

/// Trait for the Spotify album id lookup.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Resolve an artist/album pair to a Spotify id, or `None` if Spotify
    /// has no match.
    async fn get_album_id(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Option<SpotifyAlbumId>, LookupError>;
}

// Implement traits for real clients

#[async_trait]
impl DiscogsApi for super::discogs::DiscogsClient {
    async fn search(&self, barcode: &str) -> Result<Vec<DiscogsAlbum>, LookupError> {
        self.search(barcode).await
    }
}

#[async_trait]
impl SpotifyApi for super::spotify::SpotifyClient {
    async fn get_album_id(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Option<SpotifyAlbumId>, LookupError> {
        self.get_album_id(artist, album_name).await
    }
}
