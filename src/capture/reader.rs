use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use super::pipeline::CapturePipeline;
use crate::config::IcecastConfig;

/// Long-lived Icecast stream reader and top-level process driver.
///
/// Reads the streamed response body, accumulates bytes until there is enough
/// to decode meaningfully, and hands each accumulated buffer to the pipeline.
/// Reconnects forever on stream errors; only a rejected initial connection
/// ends the run.
pub struct StreamReader {
    config: IcecastConfig,
    client: Client,
}

impl StreamReader {
    pub fn new(config: IcecastConfig) -> Result<Self> {
        // No overall request timeout: the response body is endless by design.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to build stream client")?;

        Ok(Self { config, client })
    }

    /// Run until the stream endpoint rejects the connection outright.
    pub async fn run(&self, pipeline: &mut CapturePipeline) -> Result<()> {
        loop {
            info!("Attempting to connect to Icecast stream...");

            match self.connect().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        error!("Failed to connect to Icecast stream: {}", status);
                        anyhow::bail!("Stream connection rejected with status {}", status);
                    }

                    info!("Connected to Icecast stream.");

                    if let Err(e) = self.read_stream(response, pipeline).await {
                        error!(
                            "Connection error: {}. Attempting to reconnect in {} seconds...",
                            e, self.config.reconnect_secs
                        );
                    }

                    // Whatever was being recorded when the stream dropped is
                    // gone; the next connection starts from idle.
                    pipeline.reset();
                }
                Err(e) => {
                    error!(
                        "Connection error: {}. Attempting to reconnect in {} seconds...",
                        e, self.config.reconnect_secs
                    );
                }
            }

            tokio::time::sleep(Duration::from_secs(self.config.reconnect_secs)).await;
        }
    }

    async fn connect(&self) -> Result<reqwest::Response> {
        self.client
            .get(&self.config.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .context("Failed to open stream connection")
    }

    async fn read_stream(
        &self,
        response: reqwest::Response,
        pipeline: &mut CapturePipeline,
    ) -> Result<()> {
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::with_capacity(self.config.min_buffer_bytes);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Failed to read stream chunk")?;
            buffer.extend_from_slice(&chunk);

            if buffer.len() >= self.config.min_buffer_bytes {
                if let Err(e) = pipeline.ingest(&buffer).await {
                    error!("Error processing accumulated audio: {}", e);
                }
                // Cleared after every attempt, decoded or not
                buffer.clear();
            }
        }

        anyhow::bail!("Stream ended")
    }
}
