//! Discogs API integration
//!
//! Resolves a product barcode to candidate album metadata via the Discogs
//! database search.
//!
//! API docs: https://www.discogs.com/developers

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_album;
pub use client::DiscogsClient;
