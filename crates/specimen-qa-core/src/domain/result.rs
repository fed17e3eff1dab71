//! Analysis result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FeedbackItem, Rating, Severity};

/// The three quality dimensions, in reporting order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MetricKind {
    /// Mean luminance of the whole frame.
    #[serde(rename = "lighting_mean")]
    Lighting,
    /// Variance of the Laplacian over the central window.
    #[serde(rename = "sharpness_variance")]
    Sharpness,
    /// Center-to-edge luminance separation.
    #[serde(rename = "contrast_separation")]
    Contrast,
}

impl MetricKind {
    /// All metrics, in the fixed reporting order.
    pub const ALL: [Self; 3] = [Self::Lighting, Self::Sharpness, Self::Contrast];

    /// Stable metric name, as persisted in records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lighting => "lighting_mean",
            Self::Sharpness => "sharpness_variance",
            Self::Contrast => "contrast_separation",
        }
    }
}

/// Raw value and derived rating for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    /// Raw metric value, rounded to two decimals.
    pub value: f64,
    /// Rating band the raw value fell into.
    pub rating: Rating,
}

/// Complete quality analysis for a single frame.
///
/// Either all three metrics are present or the analysis failed as a whole;
/// no partial result is ever produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Per-metric readings, keyed by metric name.
    pub metrics: BTreeMap<MetricKind, MetricReading>,
    /// Feedback items in fixed order: lighting, sharpness, contrast.
    pub feedback: Vec<FeedbackItem>,
}

impl AnalysisResult {
    /// The reading for one metric, if present.
    #[must_use]
    pub fn reading(&self, kind: MetricKind) -> Option<MetricReading> {
        self.metrics.get(&kind).copied()
    }

    /// The rating for one metric, if present.
    #[must_use]
    pub fn rating(&self, kind: MetricKind) -> Option<Rating> {
        self.reading(kind).map(|reading| reading.rating)
    }

    /// The rating triple in reporting order, used for change detection.
    #[must_use]
    pub fn ratings(&self) -> Vec<(MetricKind, Rating)> {
        self.metrics
            .iter()
            .map(|(kind, reading)| (*kind, reading.rating))
            .collect()
    }

    /// Whether any feedback item carries warning severity.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.feedback
            .iter()
            .any(|item| item.severity == Severity::Warning)
    }
}
