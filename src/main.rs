use anyhow::{Context, Result};
use clap::Parser;
use ice_rdio::audio::{ClipStore, Mp3ChunkDecoder};
use ice_rdio::capture::{CapturePipeline, StreamReader};
use ice_rdio::upload::RdioClient;
use ice_rdio::Config;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[derive(Debug, Parser)]
#[command(about = "Icecast to Rdio Scanner audio processor")]
struct Args {
    /// Show per-chunk loudness while running
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cfg = Config::load("config")?;
    init_logging(&cfg.log_dir, args.debug)?;

    info!("ice-rdio v0.1.0");
    info!("Stream: {}", cfg.icecast.url);
    info!(
        "Threshold: {:.1} dBFS, talkgroup {} ({})",
        cfg.audio.threshold, cfg.rdio_scanner.talkgroup, cfg.rdio_scanner.talkgroup_label
    );

    let clip_dir = cfg
        .clip_dir
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let store = ClipStore::new(clip_dir)?;
    let uploader = RdioClient::new(&cfg.rdio_scanner)?;
    let mut pipeline = CapturePipeline::new(
        cfg.audio,
        Box::new(Mp3ChunkDecoder::new()),
        store,
        Box::new(uploader),
    );

    let reader = StreamReader::new(cfg.icecast.clone())?;
    reader.run(&mut pipeline).await
}

/// Log to the console and to a dated file under `log_dir`.
fn init_logging(log_dir: &str, debug: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir))?;

    let date = chrono::Local::now().format("%Y-%m-%d");
    let path = std::path::Path::new(log_dir).join(format!("ice-rdio-{}.log", date));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(level),
        )
        .init();

    Ok(())
}
