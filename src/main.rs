use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::oneshot;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use m3u_channels::{
    config::Config,
    drm::{build_media_item, key_set_id_hex, DrmSessionFactory, KeyRequest, OfflineLicenseHelper},
    ingestor::M3uParser,
    models::{Channel, Playlist},
    utils::{deterministic_uuid::generate_deterministic_uuid, sample_data},
};

#[derive(Parser)]
#[command(name = "m3u-channels")]
#[command(version)]
#[command(about = "Parse IPTV M3U/M3U8 playlists into channel records")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path; falls back to $CONFIG_FILE, then built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a playlist file and print its channels as JSON
    Parse {
        file: PathBuf,

        /// Base URL for relative stream URLs (overrides parser.base_url)
        #[arg(short, long, value_name = "URL")]
        base_url: Option<String>,

        /// Playlist id stamped on every channel
        #[arg(long, value_name = "UUID")]
        playlist_id: Option<Uuid>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the DRM session decision for one channel of a playlist
    Drm {
        file: PathBuf,

        /// 0-based channel index
        #[arg(short, long)]
        index: usize,

        #[arg(short, long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Download an offline license for one channel and print the key set id
    License {
        file: PathBuf,

        /// 0-based channel index
        #[arg(short, long)]
        index: usize,

        #[arg(short, long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Print the bundled sample playlist
    Sample,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("m3u_channels={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Configuration loaded from: {}", path.display());
            config
        }
        None if std::env::var_os("CONFIG_FILE").is_some() => Config::load()?,
        None => Config::default(),
    };

    match cli.command {
        Command::Parse {
            file,
            base_url,
            playlist_id,
            pretty,
        } => {
            let base_url = base_url.or_else(|| config.parser.base_url.clone());
            let playlist_id = playlist_id.unwrap_or_else(|| playlist_id_for(&file));
            let channels = load_channels(&file, base_url.as_deref(), playlist_id)?;

            let json = if pretty {
                serde_json::to_string_pretty(&channels)?
            } else {
                serde_json::to_string(&channels)?
            };
            println!("{json}");
        }
        Command::Drm {
            file,
            index,
            base_url,
        } => {
            let base_url = base_url.or_else(|| config.parser.base_url.clone());
            let channel = load_channel(&file, base_url.as_deref(), index)?;

            let factory = DrmSessionFactory::from_settings(config.drm.clone());
            let session = factory.create_session(channel.drm_config.as_ref());
            let media_item = build_media_item(&channel.url, channel.drm_config.as_ref());

            let output = serde_json::json!({
                "channel": channel.name,
                "url": channel.url,
                "session": session,
                "media_item": media_item,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::License {
            file,
            index,
            base_url,
        } => {
            let base_url = base_url.or_else(|| config.parser.base_url.clone());
            let channel = load_channel(&file, base_url.as_deref(), index)?;
            let drm_config = channel
                .drm_config
                .as_ref()
                .ok_or_else(|| anyhow!("Channel '{}' has no DRM configuration", channel.name))?;

            let helper = OfflineLicenseHelper::new(&config.drm)?;
            let (tx, rx) = oneshot::channel();
            helper.download_license(drm_config, KeyRequest::default(), move |key_set_id| {
                let _ = tx.send(key_set_id);
            });

            match rx.await? {
                Some(key_set_id) => println!("{}", key_set_id_hex(&key_set_id)),
                None => return Err(anyhow!("No offline license for '{}'", channel.name)),
            }
        }
        Command::Sample => {
            print!("{}", sample_data::SAMPLE_PLAYLIST);
        }
    }

    Ok(())
}

fn load_channels(file: &Path, base_url: Option<&str>, playlist_id: Uuid) -> Result<Vec<Channel>> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read playlist {}", file.display()))?;

    let parser = M3uParser::new();
    let parsed = parser.parse_playlist(&content, base_url);

    let mut playlist = Playlist::from_path(file.display().to_string(), file);
    playlist.id = playlist_id;
    playlist.apply_parsed(&parsed);
    info!(
        "Parsed {} channels from {} ({})",
        playlist.channel_count,
        file.display(),
        playlist.playlist_type
    );
    if let Some(epg_url) = &playlist.epg_url {
        debug!("Playlist EPG: {}", epg_url);
    }

    Ok(parser.to_channels(parsed.entries, playlist_id))
}

fn load_channel(file: &Path, base_url: Option<&str>, index: usize) -> Result<Channel> {
    let mut channels = load_channels(file, base_url, playlist_id_for(file))?;
    let count = channels.len();
    if index >= count {
        return Err(anyhow!(
            "Channel index {} out of range ({} channels)",
            index,
            count
        ));
    }
    Ok(channels.swap_remove(index))
}

/// Stable id for a playlist file so repeated runs print the same channel ids
fn playlist_id_for(file: &Path) -> Uuid {
    generate_deterministic_uuid(&[&file.display()])
}
