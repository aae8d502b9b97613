//! Ordered, deduplicated registry of input files.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::formats::is_supported_path;

/// A media file accepted for conversion.
///
/// Only constructed through the allow-list check; the path never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    /// Accept the path only if its extension is on the allow-list.
    pub fn new(path: PathBuf) -> Option<Self> {
        if is_supported_path(&path) {
            Some(Self { path })
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Destination path: same directory as the input, `.mp3` extension.
    pub fn output_path(&self) -> PathBuf {
        self.path.with_extension("mp3")
    }
}

/// Ordered set of files queued for conversion, unique by exact path.
///
/// Insertion order is preserved for display and conversion order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    files: Vec<InputFile>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add paths to the selection, skipping duplicates and unsupported
    /// formats. Returns the number of files actually added.
    pub fn add_files<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.contains(&path) {
                continue;
            }
            match InputFile::new(path) {
                Some(file) => {
                    self.files.push(file);
                    added += 1;
                }
                None => {
                    // Unsupported extension is an omission, not an error.
                }
            }
        }
        added
    }

    /// Recursively scan a directory and add every supported file found.
    /// Returns the number of files added. Walk order is filesystem-dependent.
    pub fn add_from_directory(&mut self, dir: &Path) -> usize {
        let discovered: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_supported_path(path))
            .collect();
        self.add_files(discovered)
    }

    /// Remove everything from the selection.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path() == path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Files in insertion order.
    pub fn files(&self) -> &[InputFile] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(strs: &[&str]) -> Vec<PathBuf> {
        strs.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_input_file_rejects_unsupported() {
        assert!(InputFile::new(PathBuf::from("/a/song.wav")).is_some());
        assert!(InputFile::new(PathBuf::from("/a/notes.txt")).is_none());
        assert!(InputFile::new(PathBuf::from("/a/bare")).is_none());
    }

    #[test]
    fn test_output_path_next_to_input() {
        let file = InputFile::new(PathBuf::from("/media/talks/ep1.webm")).unwrap();
        assert_eq!(file.output_path(), PathBuf::from("/media/talks/ep1.mp3"));
    }

    #[test]
    fn test_add_files_dedupes_and_filters() {
        let mut set = SelectionSet::new();
        let added = set.add_files(paths(&["/x/a.wav", "/x/a.wav", "/x/b.txt"]));
        assert_eq!(added, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.files()[0].path(), Path::new("/x/a.wav"));
    }

    #[test]
    fn test_add_files_dedupes_across_calls() {
        let mut set = SelectionSet::new();
        assert_eq!(set.add_files(paths(&["/x/a.wav", "/x/b.mp4"])), 2);
        assert_eq!(set.add_files(paths(&["/x/b.mp4", "/x/c.flac"])), 1);
        let names: Vec<String> = set.files().iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a.wav", "b.mp4", "c.flac"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = SelectionSet::new();
        set.add_files(paths(&["/x/z.ogg", "/x/a.ogg", "/x/m.ogg"]));
        let names: Vec<String> = set.files().iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["z.ogg", "a.ogg", "m.ogg"]);
    }

    #[test]
    fn test_clear_then_add_nothing_leaves_empty() {
        let mut set = SelectionSet::new();
        set.add_files(paths(&["/x/a.wav"]));
        set.clear();
        assert_eq!(set.add_files(Vec::new()), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_from_directory_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.wav"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b.mp4"), b"").unwrap();

        let mut set = SelectionSet::new();
        assert_eq!(set.add_from_directory(dir.path()), 2);

        // Scanning again adds nothing new.
        assert_eq!(set.add_from_directory(dir.path()), 0);
        assert_eq!(set.len(), 2);
    }
}
