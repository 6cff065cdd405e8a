use tracing::{info, warn};

use crate::audio::AudioSegment;

/// Per-chunk decision fed into the segmenter.
#[derive(Debug, Clone)]
pub enum Classification {
    /// Loudness above threshold; carries the decoded audio
    Active(AudioSegment),
    /// Below threshold, or the chunk failed to decode
    Silent,
}

impl Classification {
    /// Active iff the measured loudness exceeds the threshold. Decode
    /// failures never reach here; the pipeline maps them straight to Silent.
    pub fn from_loudness(segment: AudioSegment, loudness: f64, threshold: f64) -> Self {
        if loudness > threshold {
            Classification::Active(segment)
        } else {
            Classification::Silent
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Classification::Active(_))
    }
}

/// In-progress accumulation between a recording start and its close.
#[derive(Debug)]
struct RecordingSession {
    audio: AudioSegment,
}

/// Two-state machine turning a stream of per-chunk classifications into
/// discrete recordings.
///
/// Idle until a chunk classifies active, then accumulates contiguous active
/// chunks; the first silent chunk closes the session and yields the
/// accumulated audio. A single silent chunk is enough to close — there is no
/// hysteresis, so brief dips split one transmission into several recordings.
pub struct Segmenter {
    session: Option<RecordingSession>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Advance the state machine by one chunk. Returns the accumulated audio
    /// when this chunk closes a session.
    pub fn feed(&mut self, classification: Classification) -> Option<AudioSegment> {
        match (classification, self.session.take()) {
            (Classification::Active(segment), None) => {
                info!("Audio detected, starting recording...");
                self.session = Some(RecordingSession { audio: segment });
                None
            }
            (Classification::Active(segment), Some(mut session)) => {
                session.audio.append(&segment);
                self.session = Some(session);
                None
            }
            (Classification::Silent, Some(session)) => {
                info!(
                    "Audio level dropped below threshold, stopping recording ({:.1}s captured)",
                    session.audio.duration_seconds()
                );
                Some(session.audio)
            }
            (Classification::Silent, None) => None,
        }
    }

    /// Drop any in-progress session. Called when the stream connection is
    /// lost: an interrupted recording is discarded, never resumed.
    pub fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            warn!(
                "Discarding interrupted recording ({:.1}s accumulated)",
                session.audio.duration_seconds()
            );
        }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
