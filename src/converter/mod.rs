//! Batch MP3 Conversion Orchestrator
//!
//! Turns a user selection of media files into MP3s by driving an external
//! ffmpeg binary, one subprocess per file.

pub mod dragdrop;
pub mod encoder;
pub mod formats;
pub mod runner;
pub mod selection;

pub use encoder::{AudioEncoder, EncoderError, FfmpegEncoder};
pub use runner::{ConversionResult, JobHandle, JobProgress, RunnerEvent};
pub use selection::{InputFile, SelectionSet};
