//! Database module for the album cache.
//!
//! Uses SQLx with SQLite for lightweight, embedded storage. The cache is a
//! single `albums` table keyed by barcode; entries never expire and are
//! never deleted by the lookup flow (the `is_deleted` column is reserved).
//!
//! Genres cross the storage boundary through an explicit codec:
//! `Vec<String>` in the domain, a `;`-joined scalar in the column, NULL for
//! absence.
//!
//! # Example
//!
//! ```ignore
//! use crate::db::{init_db, get_album};
//!
//! let pool = init_db("sqlite:albums.db").await?;
//! let cached = get_album(&pool, "724384960650").await?;
//! ```

use chrono::{DateTime, Utc};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::lookup::domain::{Album, SpotifyAlbumId};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "barcode_albums.db";

/// Delimiter for the stored genre list.
const GENRE_DELIMITER: char = ';';

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Serialize a genre list for storage.
///
/// Callers pass a non-empty list; absence is a NULL column, never `""`.
fn encode_genres(genres: &[String]) -> String {
    genres.join(&GENRE_DELIMITER.to_string())
}

/// Reconstitute a genre list from its stored form.
fn decode_genres(stored: &str) -> Vec<String> {
    stored
        .split(GENRE_DELIMITER)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw `albums` row as stored in SQLite.
#[derive(Debug, Clone, sqlx::FromRow)]
struct AlbumRow {
    barcode: String,
    artist: String,
    name: String,
    year: String,
    genres: Option<String>,
    spotify_id: String,
    discogs_url: Option<String>,
    cover_image_url: Option<String>,
    last_update: DateTime<Utc>,
    is_deleted: bool,
}

impl AlbumRow {
    fn into_album(self) -> sqlx::Result<Album> {
        let spotify_id =
            SpotifyAlbumId::parse(&self.spotify_id).map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Album {
            barcode: self.barcode,
            artist: self.artist,
            name: self.name,
            year: self.year,
            genres: self.genres.as_deref().map(decode_genres),
            spotify_id,
            discogs_url: self.discogs_url,
            cover_image_url: self.cover_image_url,
            last_update: self.last_update,
            is_deleted: self.is_deleted,
        })
    }
}

const ALBUM_COLUMNS: &str = "barcode, artist, name, year, genres, spotify_id, \
                             discogs_url, cover_image_url, last_update, is_deleted";

/// Look up a cached album by exact barcode match.
pub async fn get_album(pool: &SqlitePool, barcode: &str) -> sqlx::Result<Option<Album>> {
    let row: Option<AlbumRow> = sqlx::query_as(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums WHERE barcode = ?"
    ))
    .bind(barcode)
    .fetch_optional(pool)
    .await?;

    row.map(AlbumRow::into_album).transpose()
}

/// Insert or refresh a resolved album.
///
/// Uses SQLite's UPSERT keyed on the barcode: when two concurrent lookups
/// for the same unseen barcode both resolve, the last writer wins and the
/// table still holds exactly one row. `last_update` is taken from the
/// record, which the caller stamps at construction time.
pub async fn upsert_album(pool: &SqlitePool, album: &Album) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO albums (barcode, artist, name, year, genres, spotify_id,
                            discogs_url, cover_image_url, last_update, is_deleted)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(barcode) DO UPDATE SET
            artist = excluded.artist,
            name = excluded.name,
            year = excluded.year,
            genres = excluded.genres,
            spotify_id = excluded.spotify_id,
            discogs_url = excluded.discogs_url,
            cover_image_url = excluded.cover_image_url,
            last_update = excluded.last_update,
            is_deleted = excluded.is_deleted
        "#,
    )
    .bind(&album.barcode)
    .bind(&album.artist)
    .bind(&album.name)
    .bind(&album.year)
    .bind(album.genres.as_deref().map(encode_genres))
    .bind(album.spotify_id.as_str())
    .bind(&album.discogs_url)
    .bind(&album.cover_image_url)
    .bind(album.last_update)
    .bind(album.is_deleted)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get all cached albums, most recently updated first.
pub async fn get_all_albums(pool: &SqlitePool) -> sqlx::Result<Vec<Album>> {
    let rows: Vec<AlbumRow> = sqlx::query_as(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums ORDER BY last_update DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AlbumRow::into_album).collect()
}
