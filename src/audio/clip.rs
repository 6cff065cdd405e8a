use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

use super::segment::AudioSegment;

/// A finished capture: trimmed audio exported to disk, awaiting upload.
#[derive(Debug, Clone)]
pub struct Clip {
    /// WAV file holding the trimmed audio
    pub path: PathBuf,
    /// When the recording closed, UTC
    pub recorded_at: DateTime<Utc>,
    pub duration_seconds: f64,
}

/// Writes finished recordings to uniquely named temporary WAV files.
///
/// Every export allocates a fresh path, so a clip still pending upload can
/// never be overwritten by the next session.
pub struct ClipStore {
    dir: PathBuf,
}

impl ClipStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create clip directory: {:?}", dir))?;

        info!("Clip store initialized at {:?}", dir);

        Ok(Self { dir })
    }

    /// Export a segment as 16-bit PCM WAV and return the finished clip.
    pub fn export(&self, segment: &AudioSegment) -> Result<Clip> {
        let path = self.dir.join(format!("clip-{}.wav", Uuid::new_v4()));

        let spec = hound::WavSpec {
            channels: segment.channels().max(1),
            sample_rate: segment.sample_rate().max(1),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

        for &sample in segment.samples() {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }

        writer.finalize().context("Failed to finalize WAV file")?;

        info!(
            "Exported clip {:?} ({:.1}s)",
            path,
            segment.duration_seconds()
        );

        Ok(Clip {
            path,
            recorded_at: Utc::now(),
            duration_seconds: segment.duration_seconds(),
        })
    }

    /// Delete a clip's file. Best effort: a failure is logged, not propagated,
    /// so the capture loop keeps running either way.
    pub fn remove(&self, clip: &Clip) {
        if let Err(e) = fs::remove_file(&clip.path) {
            warn!("Failed to remove clip file {:?}: {}", clip.path, e);
        }
    }
}
