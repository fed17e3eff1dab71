//! Analysis error taxonomy.

use thiserror::Error;

/// Errors produced by the analysis pipeline.
///
/// Both variants are deterministic validation failures: re-running the same
/// frame yields the same error, so callers never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The frame dimensions and pixel buffer disagree.
    #[error("invalid frame: {0}")]
    InvalidInput(String),

    /// The frame is too small for a sampling region to contain any pixels.
    #[error("insufficient resolution: {0}")]
    InsufficientResolution(String),
}
