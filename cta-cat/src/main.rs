//! cta-cat - cassette tape archive catalog service
//!
//! Loads the cassette dataset once, projects it into side documents
//! (falling back to the built-in catalog when that yields nothing) and
//! serves the browse API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cta_common::catalog::{global_catalog, DatasetSource};
use cta_common::config::{default_dataset, resolve_root_folder, TomlConfig, ROOT_FOLDER_ENV};
use cta_common::db::DatasetBuilder;
use cta_cat::{build_router, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command-line arguments for cta-cat
#[derive(Parser, Debug)]
#[command(name = "cta-cat")]
#[command(about = "Cassette tape archive catalog service")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Port to listen on
    #[arg(short, long, env = "CTA_PORT")]
    port: Option<u16>,

    /// Root folder holding the dataset
    #[arg(short, long, env = ROOT_FOLDER_ENV)]
    root_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "CTA_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset path or http(s) URL
    #[arg(short, long, env = "CTA_DATASET")]
    dataset: Option<String>,

    /// Base location of the audio files
    #[arg(long)]
    audio_base: Option<String>,

    /// Audio file extension
    #[arg(long)]
    audio_extension: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the catalog (default)
    Serve,
    /// Write an empty dataset with the current schema
    InitDb { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();
    let (config, config_origin) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cta-cat v{}", env!("CARGO_PKG_VERSION"));
    config_origin.log();

    match args.command.take() {
        Some(Command::InitDb { path }) => init_db(&path).await,
        Some(Command::Serve) | None => serve(args, config).await,
    }
}

async fn init_db(path: &Path) -> Result<()> {
    let builder = DatasetBuilder::create_at(path)
        .await
        .with_context(|| format!("Failed to create dataset at {}", path.display()))?;
    builder.finish().await?;
    info!("Initialized empty dataset at {}", path.display());
    Ok(())
}

async fn serve(args: Args, config: TomlConfig) -> Result<()> {
    let root_folder = resolve_root_folder(args.root_folder.as_deref(), ROOT_FOLDER_ENV, &config);
    info!("Root folder: {}", root_folder.display());

    let source = match args.dataset.or(config.dataset.clone()) {
        Some(location) => DatasetSource::parse(&location),
        None => DatasetSource::File(default_dataset(&root_folder)),
    };

    let mut audio = config.audio.clone();
    if let Some(base) = args.audio_base {
        audio.base_location = base;
    }
    if let Some(extension) = args.audio_extension {
        audio.extension = extension;
    }
    info!("Audio assets: {}/*.{}", audio.base_location, audio.extension);

    let catalog = global_catalog(&source).await;
    let app = build_router(AppState::new(catalog, audio));

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("cta-cat listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
