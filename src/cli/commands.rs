//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns an `anyhow::Result<()>`. Credentials come from
//! flags or environment variables first, then from the config file.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::lookup::{Album, LookupConfig, LookupService};
use crate::{config, db};

/// Barcode Albums CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a barcode to an album via Discogs and Spotify
    Search {
        /// The barcode to look up
        barcode: String,
        /// Discogs personal access token (or set DISCOGS_TOKEN env var)
        #[arg(long, env = "DISCOGS_TOKEN")]
        discogs_token: Option<String>,
        /// Spotify client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        spotify_client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        spotify_client_secret: Option<String>,
        /// Cache database path (default: barcode_albums.db)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all cached albums
    List {
        /// Cache database path (default: barcode_albums.db)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a template config file to the standard location
    InitConfig,
}

/// Dispatch the parsed command.
pub fn run_command(args: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &args.command {
        Commands::Search {
            barcode,
            discogs_token,
            spotify_client_id,
            spotify_client_secret,
            db,
            json,
        } => cmd_search(
            &rt,
            barcode,
            discogs_token.as_deref(),
            spotify_client_id.as_deref(),
            spotify_client_secret.as_deref(),
            db.as_deref(),
            *json,
        ),
        Commands::List { db, json } => cmd_list(&rt, db.as_deref(), *json),
        Commands::InitConfig => cmd_init_config(),
    }
}

/// Resolve a barcode and print the album.
fn cmd_search(
    rt: &Runtime,
    barcode: &str,
    discogs_token: Option<&str>,
    spotify_client_id: Option<&str>,
    spotify_client_secret: Option<&str>,
    db_path: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let file_config = config::load();

        let lookup_config = resolve_credentials(
            &file_config,
            discogs_token,
            spotify_client_id,
            spotify_client_secret,
        );

        let db_path = db_path
            .map(Path::to_path_buf)
            .or_else(|| file_config.database.path.clone());
        let pool = db::init_db(&db::db_url(db_path.as_deref())).await?;

        let service = LookupService::new(&lookup_config, pool);

        match service.search(barcode).await {
            Ok(album) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&album)?);
                } else {
                    print_album(&album);
                }
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// List every album in the cache.
fn cmd_list(rt: &Runtime, db_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let file_config = config::load();
        let db_path = db_path
            .map(Path::to_path_buf)
            .or_else(|| file_config.database.path.clone());
        let pool = db::init_db(&db::db_url(db_path.as_deref())).await?;

        let albums = db::get_all_albums(&pool).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&albums)?);
            return Ok(());
        }

        if albums.is_empty() {
            println!("Cache is empty.");
            return Ok(());
        }

        println!("{} cached album(s):", albums.len());
        println!();
        for album in &albums {
            println!(
                "  {:<14} {} - {} ({})",
                album.barcode, album.artist, album.name, album.year
            );
        }
        Ok(())
    })
}

/// Write a template config file for the user to fill in.
fn cmd_init_config() -> anyhow::Result<()> {
    let path = config::config_path()
        .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    config::save(&config::Config::default())?;
    println!("Wrote template config to {}", path.display());
    println!("Edit it to add your Discogs and Spotify credentials.");
    Ok(())
}

/// Merge flag/env credentials over the config file.
///
/// Exits with a hint when a credential is missing everywhere - there is no
/// anonymous access to either API.
fn resolve_credentials(
    file_config: &config::Config,
    discogs_token: Option<&str>,
    spotify_client_id: Option<&str>,
    spotify_client_secret: Option<&str>,
) -> LookupConfig {
    let creds = &file_config.credentials;

    let Some(discogs_token) = discogs_token
        .map(str::to_string)
        .or_else(|| creds.discogs_token.clone())
    else {
        eprintln!("Error: Discogs token required.");
        eprintln!("Get one at: https://www.discogs.com/settings/developers");
        eprintln!("Then use: --discogs-token YOUR_TOKEN or set DISCOGS_TOKEN env var");
        std::process::exit(1);
    };

    let spotify = spotify_client_id
        .map(str::to_string)
        .or_else(|| creds.spotify_client_id.clone())
        .zip(
            spotify_client_secret
                .map(str::to_string)
                .or_else(|| creds.spotify_client_secret.clone()),
        );
    let Some((spotify_client_id, spotify_client_secret)) = spotify else {
        eprintln!("Error: Spotify client id and secret required.");
        eprintln!("Create an app at: https://developer.spotify.com/dashboard");
        eprintln!("Then use: --spotify-client-id / --spotify-client-secret");
        eprintln!("or set SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET env vars");
        std::process::exit(1);
    };

    LookupConfig {
        discogs_token,
        spotify_client_id,
        spotify_client_secret,
    }
}

/// Pretty-print a resolved album.
fn print_album(album: &Album) {
    println!("✓ Album found!");
    println!();
    println!("  Artist:  {}", album.artist);
    println!("  Album:   {}", album.name);
    if !album.year.is_empty() {
        println!("  Year:    {}", album.year);
    }
    if let Some(ref genres) = album.genres {
        println!("  Genres:  {}", genres.join(", "));
    }
    println!();
    println!(
        "  Spotify: https://open.spotify.com/album/{}",
        album.spotify_id
    );
    if let Some(ref url) = album.discogs_url {
        println!("  Discogs: {}", url);
    }
    if let Some(ref cover) = album.cover_image_url {
        println!("  Cover:   {}", cover);
    }
}
