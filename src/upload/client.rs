use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use super::metadata::UploadMetadata;
use crate::audio::Clip;
use crate::config::RdioScannerConfig;

/// Upload deadline. A hanging endpoint would otherwise stall stream
/// ingestion indefinitely, since uploads run inline with the capture loop.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Destination for finished clips.
#[async_trait]
pub trait ClipSink: Send + Sync {
    /// Hand off one clip. An `Err` is a transport-level failure; an HTTP
    /// rejection is logged by the implementation and is not an error here.
    /// Either way the caller deletes the clip afterwards — no retries.
    async fn upload(&self, clip: &Clip) -> Result<()>;
}

/// Rdio Scanner call-upload client.
pub struct RdioClient {
    client: Client,
    url: String,
    metadata: UploadMetadata,
}

impl RdioClient {
    pub fn new(cfg: &RdioScannerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .context("Failed to build upload client")?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
            metadata: UploadMetadata::from_config(cfg),
        })
    }
}

#[async_trait]
impl ClipSink for RdioClient {
    async fn upload(&self, clip: &Clip) -> Result<()> {
        let bytes = tokio::fs::read(&clip.path)
            .await
            .with_context(|| format!("Failed to read clip file: {:?}", clip.path))?;

        let filename = clip
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("clip.wav")
            .to_string();

        let timestamp = clip
            .recorded_at
            .to_rfc3339_opts(SecondsFormat::Micros, true);

        let audio = Part::bytes(bytes)
            .file_name(filename.clone())
            .mime_str("audio/x-wav")
            .context("Failed to build audio form part")?;

        let mut form = Form::new()
            .part("audio", audio)
            .text("audioName", filename.clone())
            .text("audioType", "audio/x-wav")
            .text("dateTime", timestamp);
        for (name, value) in self.metadata.form_fields() {
            form = form.text(name, value);
        }

        info!("Uploading clip {} to Rdio Scanner...", filename);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?;

        let status = response.status();
        if status.is_success() {
            info!("Clip uploaded successfully.");
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Failed to upload clip ({}): {}", status, body);
        }

        Ok(())
    }
}
