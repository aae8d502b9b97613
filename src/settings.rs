//! Persisted application settings.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::converter::formats::Mp3Settings;

/// Settings saved between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory the file dialogs open in.
    pub last_open_dir: Option<PathBuf>,
    /// Explicit encoder binary, taking precedence over the search.
    pub encoder_override: Option<PathBuf>,
    /// MP3 output settings.
    pub mp3: Mp3Settings,
}

impl AppSettings {
    /// Default on-disk location, falling back to the working directory when
    /// no user config directory can be resolved.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "mp3batch")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("mp3batch-settings.json"))
    }

    /// Load settings, defaulting when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::debug!("settings not loaded from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
