//! Snapshot-file frame source.
//!
//! Implements the core [`FrameSource`] port on top of a single image file
//! that an external camera process keeps overwriting. Every pull re-reads
//! the file, so the sampler always sees the latest written frame.

use std::path::PathBuf;

use anyhow::{Context, Result};
use specimen_qa_core::{Frame, FrameSource};

/// Live frame source backed by a continuously overwritten image file.
pub struct SnapshotFrameSource {
    path: PathBuf,
}

impl SnapshotFrameSource {
    /// Creates a source reading from the given snapshot file.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The snapshot file being polled.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl FrameSource for SnapshotFrameSource {
    fn current_frame(&self) -> Result<Frame> {
        let image = image::open(&self.path)
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;
        let rgba = image.to_rgba8();
        Ok(Frame::new(rgba.width(), rgba.height(), rgba.into_raw()))
    }
}
