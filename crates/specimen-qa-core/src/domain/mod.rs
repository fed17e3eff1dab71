//! Core domain types for specimen quality analysis.

mod error;
mod feedback;
mod frame;
mod rating;
mod result;

pub use error::AnalysisError;
pub use feedback::{analysis_failed, synthesize, FeedbackItem, Severity};
pub use frame::{Frame, FRAME_CHANNELS};
pub use rating::{Rating, RatingThresholds, ThresholdError, ThresholdLadder};
pub use result::{AnalysisResult, MetricKind, MetricReading};
