//! Rdio Scanner call upload
//!
//! One multipart POST per finished clip: the WAV bytes plus the fixed
//! metadata fields configured for this stream. No retries; a failed upload
//! is logged and the clip discarded.

mod client;
mod metadata;

pub use client::{ClipSink, RdioClient};
pub use metadata::UploadMetadata;
