//! MP3 Batch Converter Library
//!
//! Orchestration core behind the GUI binary: selection registry, encoder
//! locator/wrapper and the sequential batch runner.

pub mod app;
pub mod converter;
pub mod settings;

// Re-export commonly used types
pub use app::Mp3BatchApp;
pub use converter::{
    AudioEncoder, ConversionResult, EncoderError, FfmpegEncoder, InputFile, JobHandle,
    JobProgress, RunnerEvent, SelectionSet,
};
pub use settings::AppSettings;
