//! Spotify API integration
//!
//! Resolves an artist/album name pair to a canonical Spotify album id,
//! authenticating via the client-credentials grant.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod client;

pub use client::SpotifyClient;
