use anyhow::{Context, Result};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use super::segment::AudioSegment;

/// Turns a buffer of encoded stream bytes into playable audio.
///
/// The capture pipeline treats this as a black box: it hands over whatever
/// bytes accumulated since the last attempt and gets back a segment whose
/// loudness it can measure, or an error it classifies as silence.
pub trait ChunkDecoder: Send {
    fn decode(&mut self, bytes: &[u8]) -> Result<AudioSegment>;
}

/// MP3 decoder for accumulated Icecast stream chunks.
///
/// Chunk boundaries rarely line up with MP3 frame boundaries, so corrupt
/// frames at either edge are skipped rather than failing the whole chunk.
pub struct Mp3ChunkDecoder;

impl Mp3ChunkDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Mp3ChunkDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkDecoder for Mp3ChunkDecoder {
    fn decode(&mut self, bytes: &[u8]) -> Result<AudioSegment> {
        let stream = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("mp3");

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .context("Failed to probe stream chunk")?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .context("No audio track in stream chunk")?;
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("Failed to create audio decoder")?;

        let mut samples: Vec<i16> = Vec::new();
        let mut sample_rate = 0u32;
        let mut channels = 0u16;
        let mut sample_buf: Option<SampleBuffer<i16>> = None;
        let mut skipped_frames = 0usize;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(e).context("Failed to read stream packet"),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(_)) => {
                    // Partial frame at a chunk boundary
                    skipped_frames += 1;
                    continue;
                }
                Err(e) => return Err(e).context("Failed to decode audio frame"),
            };

            let spec = *decoded.spec();
            sample_rate = spec.rate;
            channels = spec.channels.count() as u16;

            let buf = sample_buf
                .get_or_insert_with(|| SampleBuffer::<i16>::new(decoded.capacity() as u64, spec));
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }

        if skipped_frames > 0 {
            debug!("Skipped {} undecodable frames in chunk", skipped_frames);
        }

        if samples.is_empty() {
            anyhow::bail!("No decodable audio frames in chunk");
        }

        Ok(AudioSegment::new(samples, sample_rate, channels))
    }
}
