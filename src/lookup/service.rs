//! Lookup service - orchestrates barcode-to-album resolution
//!
//! This is the high-level API for resolving a barcode:
//! 1. Check the local album cache
//! 2. On a miss, search Discogs by barcode
//! 3. Resolve the cleaned artist/album pair to a Spotify id
//! 4. Persist the merged record and return it

use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::lookup::{
    discogs::DiscogsClient,
    domain::{Album, LookupError, clean_artist},
    spotify::SpotifyClient,
    traits::{DiscogsApi, SpotifyApi},
};

/// Configuration for the lookup service
#[derive(Debug, Clone, Default)]
pub struct LookupConfig {
    /// Discogs personal access token
    pub discogs_token: String,
    /// Spotify app client id
    pub spotify_client_id: String,
    /// Spotify app client secret
    pub spotify_client_secret: String,
}

/// Service for resolving barcodes to albums via Discogs and Spotify
pub struct LookupService<D = DiscogsClient, S = SpotifyClient> {
    discogs: D,
    spotify: S,
    pool: SqlitePool,
}

impl LookupService {
    /// Create a new lookup service with real API clients.
    pub fn new(config: &LookupConfig, pool: SqlitePool) -> Self {
        Self {
            discogs: DiscogsClient::new(&config.discogs_token),
            spotify: SpotifyClient::new(&config.spotify_client_id, &config.spotify_client_secret),
            pool,
        }
    }
}

impl<D: DiscogsApi, S: SpotifyApi> LookupService<D, S> {
    /// Create a service with custom clients (used by tests).
    pub fn with_clients(discogs: D, spotify: S, pool: SqlitePool) -> Self {
        Self {
            discogs,
            spotify,
            pool,
        }
    }

    /// Resolve a barcode to an album.
    ///
    /// Cache hits return immediately with no external calls; cached entries
    /// never expire. On a miss the first Discogs candidate wins - there is
    /// no ranking among multiple matches, a known accuracy limitation.
    ///
    /// The cache read and write are independent transactional units: two
    /// concurrent lookups for the same unseen barcode can both resolve
    /// externally, and the store's barcode-keyed upsert makes the last
    /// writer win.
    pub async fn search(&self, barcode: &str) -> Result<Album, LookupError> {
        if let Some(album) = db::get_album(&self.pool, barcode).await? {
            tracing::debug!(barcode, "cache hit");
            return Ok(album);
        }

        tracing::debug!(barcode, "cache miss, searching Discogs");
        let mut candidates = self.discogs.search(barcode).await?;
        if candidates.is_empty() {
            return Err(LookupError::NoDiscogsAlbum {
                barcode: barcode.to_string(),
            });
        }
        let candidate = candidates.swap_remove(0);

        let artist = clean_artist(&candidate.artist);

        let Some(spotify_id) = self.spotify.get_album_id(&artist, &candidate.name).await? else {
            return Err(LookupError::NoSpotifyAlbum {
                artist,
                album: candidate.name,
            });
        };

        let album = Album {
            barcode: barcode.to_string(),
            artist,
            name: candidate.name,
            year: candidate.year,
            genres: candidate.genres,
            spotify_id,
            discogs_url: candidate.url,
            cover_image_url: candidate.cover_image,
            last_update: chrono::Utc::now(),
            is_deleted: false,
        };

        db::upsert_album(&self.pool, &album).await?;
        tracing::info!(barcode, artist = %album.artist, name = %album.name, "cached resolved album");

        Ok(album)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::domain::DiscogsAlbum;
    use crate::lookup::traits::mocks::{MockDiscogs, MockSpotify};

    const SPOTIFY_ID: &str = "1g9kvXnqNqK3xJXQh5QzNm";

    async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = db::init_db(&db::db_url(Some(&db_path))).await.unwrap();
        (temp_dir, pool)
    }

    fn discovery_candidate() -> DiscogsAlbum {
        DiscogsAlbum {
            artist: "Daft Punk".to_string(),
            name: "Discovery".to_string(),
            year: "2001".to_string(),
            genres: Some(vec!["Electronic".to_string()]),
            url: Some("https://api.discogs.com/masters/3936".to_string()),
            cover_image: Some("https://i.discogs.com/cover.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn test_successful_resolution_is_cached() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate()]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool.clone(),
        );

        let album = service.search("724384960650").await.unwrap();

        assert_eq!(album.artist, "Daft Punk");
        assert_eq!(album.name, "Discovery");
        assert_eq!(album.year, "2001");
        assert_eq!(album.spotify_id.as_str(), SPOTIFY_ID);
        assert!(!album.is_deleted);

        // Exactly one row was inserted for the barcode.
        let cached = db::get_all_albums(&pool).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].barcode, "724384960650");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_external_calls() {
        let (_dir, pool) = test_pool().await;

        // Seed the cache through a first lookup.
        let seed = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate()]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool.clone(),
        );
        seed.search("724384960650").await.unwrap();

        // A second service whose clients would fail if ever called.
        let service = LookupService::with_clients(
            MockDiscogs::failing("must not be called"),
            MockSpotify::failing("must not be called"),
            pool,
        );
        let album = service.search("724384960650").await.unwrap();

        assert_eq!(album.name, "Discovery");
        assert_eq!(service.discogs.calls(), 0);
        assert_eq!(service.spotify.calls(), 0);
    }

    #[tokio::test]
    async fn test_miss_issues_one_call_per_client() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate()]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool,
        );

        service.search("724384960650").await.unwrap();

        assert_eq!(service.discogs.calls(), 1);
        assert_eq!(service.spotify.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_discogs_results() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::no_matches(),
            MockSpotify::with_id(SPOTIFY_ID),
            pool,
        );

        let err = service.search("000000000000").await.unwrap_err();

        assert!(matches!(err, LookupError::NoDiscogsAlbum { .. }));
        assert!(err.to_string().contains("000000000000"));
        // No candidate, so the identity lookup never ran.
        assert_eq!(service.spotify.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_spotify_match_persists_nothing() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate()]),
            MockSpotify::no_match(),
            pool.clone(),
        );

        let err = service.search("724384960650").await.unwrap_err();

        assert!(matches!(err, LookupError::NoSpotifyAlbum { .. }));
        let msg = err.to_string();
        assert!(msg.contains("Daft Punk"));
        assert!(msg.contains("Discovery"));

        // Partially resolved state is never persisted.
        assert!(db::get_all_albums(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artist_is_cleaned_before_spotify_lookup() {
        let (_dir, pool) = test_pool().await;
        let mut candidate = discovery_candidate();
        candidate.artist = "Daft Punk (2)".to_string();

        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![candidate]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool,
        );

        let album = service.search("724384960650").await.unwrap();

        assert_eq!(album.artist, "Daft Punk");
        assert_eq!(
            service.spotify.seen.lock().unwrap()[0],
            ("Daft Punk".to_string(), "Discovery".to_string())
        );
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let (_dir, pool) = test_pool().await;
        let mut second = discovery_candidate();
        second.name = "Homework".to_string();

        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate(), second]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool,
        );

        let album = service.search("724384960650").await.unwrap();
        assert_eq!(album.name, "Discovery");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::failing("connection refused"),
            MockSpotify::with_id(SPOTIFY_ID),
            pool.clone(),
        );

        let err = service.search("724384960650").await.unwrap_err();

        assert!(matches!(err, LookupError::Network(_)));
        assert!(!err.is_not_found());
        assert!(db::get_all_albums(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let (_dir, pool) = test_pool().await;
        let service = LookupService::with_clients(
            MockDiscogs::with_results(vec![discovery_candidate()]),
            MockSpotify::with_id(SPOTIFY_ID),
            pool,
        );

        let first = service.search("724384960650").await.unwrap();
        let second = service.search("724384960650").await.unwrap();

        assert_eq!(first.spotify_id, second.spotify_id);
        // The miss resolved externally once; the hit added nothing.
        assert_eq!(service.discogs.calls(), 1);
        assert_eq!(service.spotify.calls(), 1);
    }
}
