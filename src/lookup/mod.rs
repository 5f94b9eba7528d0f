//! Barcode lookup module - resolves product barcodes to albums via external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`discogs/dto.rs`, `spotify/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Service** - Cache-aside orchestration of the lookup flow
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing business logic
//!
//! # Usage
//!
//! ```ignore
//! use crate::lookup::{LookupService, LookupConfig};
//!
//! let config = LookupConfig {
//!     discogs_token: "your-token".to_string(),
//!     spotify_client_id: "your-id".to_string(),
//!     spotify_client_secret: "your-secret".to_string(),
//! };
//! let service = LookupService::new(&config, pool);
//!
//! let album = service.search("724384960650").await?;
//! println!("{} - {}", album.artist, album.name);
//! ```

pub mod domain;
pub mod discogs;
pub mod spotify;
pub mod traits;
pub mod service;

pub use domain::{Album, DiscogsAlbum, LookupError, SpotifyAlbumId, clean_artist};
pub use service::{LookupConfig, LookupService};
