use tracing::warn;

/// Decoded audio held in memory (16-bit PCM, interleaved)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSegment {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Neutral accumulator seed; appending to it adopts the appended format
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Append another segment's samples, keeping accumulation contiguous.
    ///
    /// An empty segment takes on the appended segment's format.
    pub fn append(&mut self, other: &AudioSegment) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            self.sample_rate = other.sample_rate;
            self.channels = other.channels;
        } else if self.sample_rate != other.sample_rate || self.channels != other.channels {
            warn!(
                "Appending segment with mismatched format: {}Hz/{}ch onto {}Hz/{}ch",
                other.sample_rate, other.channels, self.sample_rate, self.channels
            );
        }

        self.samples.extend_from_slice(&other.samples);
    }

    /// Average loudness in dBFS (0 = full scale). Empty or all-zero audio
    /// yields negative infinity, which is below any usable threshold.
    pub fn dbfs(&self) -> f64 {
        if self.samples.is_empty() {
            return f64::NEG_INFINITY;
        }

        let sum_squares: f64 = self
            .samples
            .iter()
            .map(|&s| {
                let s = s as f64;
                s * s
            })
            .sum();
        let rms = (sum_squares / self.samples.len() as f64).sqrt();

        if rms == 0.0 {
            return f64::NEG_INFINITY;
        }

        20.0 * (rms / i16::MIN.unsigned_abs() as f64).log10()
    }

    /// Everything from `start_ms` onward, aligned to a frame boundary.
    /// A start at or past the end yields a zero-length segment.
    pub fn slice_from_ms(&self, start_ms: u64) -> AudioSegment {
        let frame = self.channels.max(1) as usize;
        let start_frames = (start_ms as u128 * self.sample_rate as u128 / 1000) as usize;
        let start = (start_frames * frame).min(self.samples.len());

        AudioSegment {
            samples: self.samples[start..].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// The window `[start_ms, end_ms)`, frame-aligned, clamped to the segment.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> AudioSegment {
        let frame = self.channels.max(1) as usize;
        let start_frames = (start_ms as u128 * self.sample_rate as u128 / 1000) as usize;
        let end_frames = (end_ms as u128 * self.sample_rate as u128 / 1000) as usize;
        let start = (start_frames * frame).min(self.samples.len());
        let end = (end_frames * frame).min(self.samples.len()).max(start);

        AudioSegment {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        (self.duration_seconds() * 1000.0).round() as u64
    }
}
