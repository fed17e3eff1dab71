//! Publication port: the overlay/record-side collaborator.

use crate::domain::AnalysisResult;

/// Receives analysis results published by the realtime sampler.
pub trait FeedbackSink: Send + Sync {
    /// Called once per published result.
    ///
    /// Suppressed duplicates (unchanged rating triples) never reach the
    /// sink; the consumer keeps showing the previous publication.
    fn publish(&self, result: AnalysisResult);
}
