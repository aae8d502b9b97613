//! External encoder discovery and invocation.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use super::formats::Mp3Settings;

/// Errors from a single encoder invocation.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("failed to spawn encoder process: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("encoder {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Subdirectories probed for a local encoder binary.
const LOCAL_SUBDIRS: &[&str] = &["ffmpeg", "bin", "tools"];

fn encoder_binary_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "ffmpeg.exe"
    } else {
        "ffmpeg"
    }
}

/// Locate an ffmpeg binary, or `None` if there is none to be found.
///
/// Search order, first match wins:
/// 1. `ffmpeg` on the PATH, verified by running it with `-version`.
/// 2. The fixed binary name in the working directory.
/// 3. The same name under `ffmpeg/`, `bin/` and `tools/`.
///
/// Absence is a normal outcome; the caller disables conversion.
pub fn locate() -> Option<PathBuf> {
    if let Ok(path) = which::which("ffmpeg") {
        if version_probe(&path) {
            return Some(path);
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    locate_local(&cwd)
}

/// Scan the fixed local fallback locations under `base`.
fn locate_local(base: &Path) -> Option<PathBuf> {
    let name = encoder_binary_name();
    let mut candidates = vec![base.join(name)];
    for subdir in LOCAL_SUBDIRS {
        candidates.push(base.join(subdir).join(name));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Run the binary with `-version` and check for a clean exit.
fn version_probe(path: &Path) -> bool {
    Command::new(path)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Seam between the batch runner and the real subprocess wrapper.
pub trait AudioEncoder {
    /// Transcode `input` to MP3 at `output`, blocking until done.
    fn convert(&self, input: &Path, output: &Path) -> Result<(), EncoderError>;
}

/// Invokes the external ffmpeg binary once per file.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
    settings: Mp3Settings,
}

impl FfmpegEncoder {
    pub fn new(binary: PathBuf, settings: Mp3Settings) -> Self {
        Self { binary, settings }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Full argument vector for one invocation:
    /// `-y -i <input> -vn -acodec libmp3lame -ab <rate>k -ar 44100 -ac 2 <output>`
    fn build_args(&self, input: &Path, output: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = vec![
            "-y".into(),
            "-i".into(),
            input.as_os_str().to_os_string(),
        ];
        args.extend(self.settings.encoder_args().into_iter().map(Into::into));
        args.push(output.as_os_str().to_os_string());
        args
    }
}

impl AudioEncoder for FfmpegEncoder {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), EncoderError> {
        let result = Command::new(&self.binary)
            .args(self.build_args(input, output))
            .stdin(Stdio::null())
            .output()?;

        if result.status.success() {
            Ok(())
        } else {
            Err(EncoderError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_contract() {
        let encoder = FfmpegEncoder::new(PathBuf::from("ffmpeg"), Mp3Settings::default());
        let args = encoder.build_args(Path::new("/in/a.wav"), Path::new("/in/a.mp3"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "-y", "-i", "/in/a.wav", "-vn", "-acodec", "libmp3lame", "-ab", "192k", "-ar",
                "44100", "-ac", "2", "/in/a.mp3",
            ]
        );
    }

    #[test]
    fn test_locate_local_finds_subdir_binary() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(locate_local(dir.path()), None);

        std::fs::create_dir(dir.path().join("bin")).unwrap();
        let binary = dir.path().join("bin").join(encoder_binary_name());
        std::fs::write(&binary, b"").unwrap();
        assert_eq!(locate_local(dir.path()), Some(binary));
    }

    #[test]
    fn test_locate_local_prefers_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join(encoder_binary_name());
        std::fs::write(&top, b"").unwrap();
        std::fs::create_dir(dir.path().join("tools")).unwrap();
        std::fs::write(dir.path().join("tools").join(encoder_binary_name()), b"").unwrap();

        assert_eq!(locate_local(dir.path()), Some(top));
    }
}
