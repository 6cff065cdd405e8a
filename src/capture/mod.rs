//! Stream capture and segmentation
//!
//! This module turns the continuous broadcast stream into discrete
//! recordings:
//! - `StreamReader` owns the connection and the byte accumulator
//! - `Segmenter` is the idle/recording state machine
//! - `CapturePipeline` wires decode, classification, trimming, export and
//!   upload together

pub mod pipeline;
pub mod reader;
pub mod segmenter;

pub use pipeline::CapturePipeline;
pub use reader::StreamReader;
pub use segmenter::{Classification, Segmenter};
