use anyhow::Result;
use tracing::{debug, error};

use super::segmenter::{Classification, Segmenter};
use crate::audio::{trim_leading_silence, AudioSegment, ChunkDecoder, ClipStore};
use crate::config::AudioConfig;
use crate::upload::ClipSink;

/// Decode → classify → segment → trim → export → upload, one accumulated
/// chunk at a time.
///
/// Everything downstream of a closed session runs inline: while a clip is
/// exported and uploaded no new chunk is processed, so a new session cannot
/// open concurrently with clip finalization.
pub struct CapturePipeline {
    audio: AudioConfig,
    decoder: Box<dyn ChunkDecoder>,
    segmenter: Segmenter,
    store: ClipStore,
    sink: Box<dyn ClipSink>,
}

impl CapturePipeline {
    pub fn new(
        audio: AudioConfig,
        decoder: Box<dyn ChunkDecoder>,
        store: ClipStore,
        sink: Box<dyn ClipSink>,
    ) -> Self {
        Self {
            audio,
            decoder,
            segmenter: Segmenter::new(),
            store,
            sink,
        }
    }

    /// Process one accumulated buffer of stream bytes.
    ///
    /// A chunk that fails to decode counts as silence: ambiguous input never
    /// starts or extends a recording, though it can close one.
    pub async fn ingest(&mut self, bytes: &[u8]) -> Result<()> {
        let classification = match self.decoder.decode(bytes) {
            Ok(segment) => {
                let loudness = segment.dbfs();
                debug!("Current loudness: {:.2} dBFS", loudness);
                Classification::from_loudness(segment, loudness, self.audio.threshold)
            }
            Err(e) => {
                error!("Error processing audio: {}", e);
                Classification::Silent
            }
        };

        if let Some(recording) = self.segmenter.feed(classification) {
            self.finish_recording(recording).await?;
        }

        Ok(())
    }

    /// Close out a session: trim, export, upload, delete.
    async fn finish_recording(&mut self, recording: AudioSegment) -> Result<()> {
        let trimmed =
            trim_leading_silence(recording, self.audio.threshold, self.audio.trim_chunk_ms);

        let clip = self.store.export(&trimmed)?;

        if let Err(e) = self.sink.upload(&clip).await {
            error!("Error uploading clip: {}", e);
        }

        // Delete whether or not the upload went through; nothing is retried
        // and clips must not pile up on disk.
        self.store.remove(&clip);

        Ok(())
    }

    /// Drop any in-progress session, e.g. after losing the stream.
    pub fn reset(&mut self) {
        self.segmenter.reset();
    }

    pub fn is_recording(&self) -> bool {
        self.segmenter.is_recording()
    }
}
