//! Filesystem adapter for loading captured frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use specimen_qa_core::Frame;
use tracing::{debug, warn};

/// Supported capture file extensions.
const CAPTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff", "tif"];

/// A frame loaded from disk together with its origin path.
#[derive(Debug, Clone)]
pub struct CaptureFrame {
    /// Path the frame was loaded from.
    pub path: String,
    /// Decoded RGBA frame.
    pub frame: Frame,
}

/// Batch frame loader over files and directories.
pub struct FsFrameSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsFrameSource {
    /// Creates a new filesystem frame source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all capture files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported_capture(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported_capture(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }

    /// Iterates over decoded frames; individual items may be load errors.
    pub fn frames(&self) -> Box<dyn Iterator<Item = Result<CaptureFrame>> + Send + '_> {
        let mut files = self.collect_files();
        files.sort();
        debug!("Found {} capture files", files.len());

        Box::new(files.into_iter().map(|path| load_frame(&path)))
    }

    /// Number of capture files, if cheaply known.
    #[must_use]
    pub fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks whether a path has a supported capture extension.
fn is_supported_capture(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| CAPTURE_EXTENSIONS.contains(&e.as_str()))
}

/// Loads one capture file as an RGBA frame.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or decoded.
pub fn load_frame(path: &Path) -> Result<CaptureFrame> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    let rgba = image.to_rgba8();

    Ok(CaptureFrame {
        path: path.to_string_lossy().into_owned(),
        frame: Frame::new(rgba.width(), rgba.height(), rgba.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_capture() {
        assert!(is_supported_capture(Path::new("shot.jpg")));
        assert!(is_supported_capture(Path::new("shot.JPEG")));
        assert!(is_supported_capture(Path::new("shot.png")));
        assert!(is_supported_capture(Path::new("shot.webp")));
        assert!(!is_supported_capture(Path::new("notes.txt")));
        assert!(!is_supported_capture(Path::new("shot")));
    }
}
