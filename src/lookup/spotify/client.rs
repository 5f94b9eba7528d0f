//! Spotify HTTP client
//!
//! Handles communication with the Spotify Web API using the
//! client-credentials grant.
//! See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
//!
//! ## Token cache
//!
//! The bearer token is acquired lazily on first use and held for the
//! lifetime of the client instance as an explicit `Mutex<Option<String>>`.
//! All acquisition goes through [`SpotifyClient::access_token`] - there is
//! no other mutation of that state. The token's `expires_in` is ignored:
//! a client that outlives the token (1h upstream) will start failing with
//! 401s rather than re-authenticate. Callers in this crate are short-lived
//! (one CLI invocation), so refresh handling is deliberately absent.

use tokio::sync::Mutex;

use super::dto;
use crate::lookup::domain::{LookupError, SpotifyAlbumId};

/// Spotify API client
pub struct SpotifyClient {
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
    auth_url: String,
    base_url: String,
    /// Cached bearer token; written only by `access_token`
    token: Mutex<Option<String>>,
}

impl SpotifyClient {
    /// Create a new client with the given app credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http_client,
            auth_url: "https://accounts.spotify.com/api/token".to_string(),
            base_url: "https://api.spotify.com/v1".to_string(),
            token: Mutex::new(None),
        }
    }

    /// Create a client for testing with custom endpoints
    #[cfg(test)]
    pub fn with_urls(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http_client: reqwest::Client::new(),
            auth_url: auth_url.into(),
            base_url: base_url.into(),
            token: Mutex::new(None),
        }
    }

    /// Look up the Spotify id for an album by artist and album name.
    ///
    /// Issues a single search with `limit=1` and returns the first match,
    /// or `None` when Spotify knows no such album.
    pub async fn get_album_id(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Option<SpotifyAlbumId>, LookupError> {
        let token = self.access_token().await?;
        let response = self.send_search_request(&token, artist, album_name).await?;

        match response.albums.items.first() {
            Some(item) => Ok(Some(SpotifyAlbumId::parse(&item.id)?)),
            None => Ok(None),
        }
    }

    /// Acquire-or-reuse the bearer token.
    ///
    /// Holding the lock across the exchange means two concurrent first
    /// calls on one instance still perform exactly one exchange.
    async fn access_token(&self) -> Result<String, LookupError> {
        let mut token = self.token.lock().await;
        if let Some(ref cached) = *token {
            return Ok(cached.clone());
        }

        let fresh = self.exchange_credentials().await?;
        *token = Some(fresh.clone());
        tracing::debug!("acquired Spotify access token");
        Ok(fresh)
    }

    /// Exchange client credentials for an access token.
    async fn exchange_credentials(&self) -> Result<String, LookupError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.auth_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            tracing::error!(status = status.as_u16(), %body, "Spotify token exchange failed");
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let token = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        Ok(token.access_token)
    }

    /// Send the search request and parse the response
    async fn send_search_request(
        &self,
        token: &str,
        artist: &str,
        album_name: &str,
    ) -> Result<dto::SearchResponse, LookupError> {
        let url = format!("{}/search", self.base_url);
        let query = format!("album:{album_name} artist:{artist}");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("type", "album"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            tracing::error!(status = status.as_u16(), %body, "Spotify search failed");
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}
