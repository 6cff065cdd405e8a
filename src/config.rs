use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub icecast: IcecastConfig,
    pub audio: AudioConfig,
    pub rdio_scanner: RdioScannerConfig,
    /// Directory for dated log files
    pub log_dir: String,
    /// Directory for temporary clip files (defaults to the system temp dir)
    #[serde(default)]
    pub clip_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IcecastConfig {
    /// Stream URL (mountpoint included)
    pub url: String,
    pub username: String,
    pub password: String,
    /// Connect/read timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Delay before reconnecting after a dropped stream, in seconds
    #[serde(default = "default_reconnect_secs")]
    pub reconnect_secs: u64,
    /// Bytes to accumulate before attempting a decode
    #[serde(default = "default_min_buffer_bytes")]
    pub min_buffer_bytes: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AudioConfig {
    /// Loudness threshold in dBFS; chunks above it count as transmissions
    pub threshold: f64,
    /// Window size in milliseconds used when scanning for silent runs
    #[serde(default = "default_trim_chunk_ms")]
    pub trim_chunk_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RdioScannerConfig {
    /// Call-upload endpoint URL
    pub url: String,
    pub api_key: String,
    /// Frequency in Hz reported with every call
    pub frequency: u64,
    /// Source (radio unit) id
    pub source: u32,
    pub system: u32,
    pub system_label: String,
    pub talkgroup: u32,
    pub talkgroup_group: String,
    pub talkgroup_label: String,
    pub talkgroup_tag: String,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_reconnect_secs() -> u64 {
    5
}

fn default_min_buffer_bytes() -> usize {
    65536
}

fn default_trim_chunk_ms() -> u64 {
    10
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
