pub mod clip;
pub mod decode;
pub mod segment;
pub mod trim;

pub use clip::{Clip, ClipStore};
pub use decode::{ChunkDecoder, Mp3ChunkDecoder};
pub use segment::AudioSegment;
pub use trim::{detect_silence, trim_leading_silence};
