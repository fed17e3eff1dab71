//! Full-pipeline analyzer.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::{
    analysis_failed, synthesize, AnalysisError, AnalysisResult, Frame, MetricKind, MetricReading,
    RatingThresholds,
};
use crate::luminance::to_luminance;
use crate::modules::{contrast_separation, lighting_mean, sharpness_variance};

/// Runs the complete analysis pipeline on single frames.
///
/// Stateless apart from its threshold configuration; one analyzer can be
/// shared between the explicit-capture path and the realtime sampler.
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    thresholds: RatingThresholds,
}

impl QualityAnalyzer {
    /// Creates an analyzer with the given rating thresholds.
    #[must_use]
    pub const fn new(thresholds: RatingThresholds) -> Self {
        Self { thresholds }
    }

    /// The configured rating thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &RatingThresholds {
        &self.thresholds
    }

    /// Analyzes one frame: luminance conversion, the three metric
    /// extractors, rating classification, and feedback synthesis.
    ///
    /// Ratings are derived from the raw metric values; the stored reading
    /// is rounded to two decimals.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] when the frame is malformed or too small
    /// for a sampling region. No partial result is produced.
    pub fn analyze(&self, frame: &Frame) -> Result<AnalysisResult, AnalysisError> {
        let luma = to_luminance(frame)?;

        let lighting = lighting_mean(&luma)?;
        let sharpness = sharpness_variance(&luma)?;
        let contrast = contrast_separation(&luma)?;

        let mut metrics = BTreeMap::new();
        let mut feedback = Vec::with_capacity(MetricKind::ALL.len());
        for (kind, value) in [
            (MetricKind::Lighting, lighting),
            (MetricKind::Sharpness, sharpness),
            (MetricKind::Contrast, contrast),
        ] {
            let rating = self.thresholds.ladder(kind).rate(value);
            metrics.insert(
                kind,
                MetricReading {
                    value: round2(value),
                    rating,
                },
            );
            feedback.push(synthesize(kind, rating));
        }

        Ok(AnalysisResult { metrics, feedback })
    }

    /// Explicit-capture entry point.
    ///
    /// A failed analysis degrades to a single warning entry instead of an
    /// error so the capture workflow is never blocked.
    #[must_use]
    pub fn capture(&self, frame: &Frame) -> AnalysisResult {
        match self.analyze(frame) {
            Ok(result) => result,
            Err(e) => {
                warn!("capture analysis failed: {e}");
                AnalysisResult {
                    metrics: BTreeMap::new(),
                    feedback: vec![analysis_failed()],
                }
            }
        }
    }
}

/// Rounds a metric value to two decimals for the stored reading.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
