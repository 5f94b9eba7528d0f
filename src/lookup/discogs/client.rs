//! Discogs HTTP client
//!
//! Handles communication with the Discogs database search API.
//! See: https://www.discogs.com/developers
//!
//! Authentication uses a personal access token sent as
//! `Authorization: Discogs token=<token>`.

use super::{adapter, dto};
use crate::lookup::domain::{DiscogsAlbum, LookupError};

/// Discogs API client
pub struct DiscogsClient {
    token: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl DiscogsClient {
    /// Create a new client with the given personal access token.
    pub fn new(token: impl Into<String>) -> Self {
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
            token: token.into(),
            http_client,
            base_url: "https://api.discogs.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Search releases by barcode.
    ///
    /// Returns an empty vec when the barcode matches nothing - turning that
    /// into a domain not-found is the orchestrator's job, not ours.
    pub async fn search(&self, barcode: &str) -> Result<Vec<DiscogsAlbum>, LookupError> {
        let response = self.send_search_request(barcode).await?;
        response.results.into_iter().map(adapter::to_album).collect()
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(&self, barcode: &str) -> Result<dto::SearchResponse, LookupError> {
        let url = format!("{}/database/search", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("barcode", barcode)])
            .header("Authorization", format!("Discogs token={}", self.token))
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            tracing::error!(status = status.as_u16(), %body, "Discogs search failed");
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
