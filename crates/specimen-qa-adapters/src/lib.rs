//! Specimen QA Adapters - frame acquisition for the analysis core.
//!
//! Bridges the filesystem to the core [`Frame`](specimen_qa_core::Frame)
//! type: batch loading of captured images and a polling source backed by a
//! live snapshot file.

pub mod fs;
pub mod snapshot;

pub use fs::{load_frame, CaptureFrame, FsFrameSource};
pub use snapshot::SnapshotFrameSource;
