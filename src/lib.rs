pub mod audio;
pub mod capture;
pub mod config;
pub mod upload;

pub use audio::{AudioSegment, ChunkDecoder, Clip, ClipStore, Mp3ChunkDecoder};
pub use capture::{CapturePipeline, Classification, Segmenter, StreamReader};
pub use config::Config;
pub use upload::{ClipSink, RdioClient, UploadMetadata};
