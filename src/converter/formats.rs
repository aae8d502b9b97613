//! Input format allow-list and MP3 output settings.

#![allow(dead_code)]

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported input file extensions (lowercase, without the dot).
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &[
    "mp4", "m4a", "m4s", "aac", "avi", "flac", "wav", "ogg", "wmv", "mov", "mpg", "mpeg", "webm",
    "mkv",
];

/// Check if a file extension is accepted for conversion.
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    SUPPORTED_INPUT_EXTENSIONS.iter().any(|e| *e == ext_lower)
}

/// Check a full path against the allow-list.
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(is_supported_extension)
        .unwrap_or(false)
}

/// MP3 bitrate presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BitratePreset {
    Kbps128,
    #[default]
    Kbps192,
    Kbps256,
    Kbps320,
}

impl BitratePreset {
    /// Returns the bitrate in kbps.
    pub fn kbps(&self) -> u32 {
        match self {
            BitratePreset::Kbps128 => 128,
            BitratePreset::Kbps192 => 192,
            BitratePreset::Kbps256 => 256,
            BitratePreset::Kbps320 => 320,
        }
    }

    /// Returns the ffmpeg `-ab` argument value.
    pub fn encoder_arg(&self) -> String {
        format!("{}k", self.kbps())
    }

    /// Returns a human-readable name.
    pub fn display_name(&self) -> String {
        format!("{} kbps", self.kbps())
    }

    /// All available presets.
    pub fn all() -> &'static [BitratePreset] {
        &[
            BitratePreset::Kbps128,
            BitratePreset::Kbps192,
            BitratePreset::Kbps256,
            BitratePreset::Kbps320,
        ]
    }
}

/// MP3 output settings, expanded into encoder arguments.
///
/// Sample rate and channel count are fixed; only the bitrate is selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Mp3Settings {
    pub bitrate: BitratePreset,
}

impl Mp3Settings {
    pub const SAMPLE_RATE_HZ: u32 = 44_100;
    pub const CHANNELS: u32 = 2;

    /// Encoder arguments placed between the input and output paths.
    pub fn encoder_args(&self) -> Vec<String> {
        vec![
            "-vn".to_string(),
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            "-ab".to_string(),
            self.bitrate.encoder_arg(),
            "-ar".to_string(),
            Self::SAMPLE_RATE_HZ.to_string(),
            "-ac".to_string(),
            Self::CHANNELS.to_string(),
        ]
    }
}
