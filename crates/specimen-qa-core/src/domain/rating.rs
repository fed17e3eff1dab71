//! Quality ratings and the threshold ladders that produce them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MetricKind;

/// Ordinal quality rating, worst to best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Well below usable quality.
    VeryPoor,
    /// Below usable quality.
    Poor,
    /// Usable but worth improving.
    Intermediate,
    /// Good quality.
    Good,
    /// Excellent quality.
    VeryGood,
}

impl Rating {
    /// All ratings in ascending order.
    pub const ALL: [Self; 5] = [
        Self::VeryPoor,
        Self::Poor,
        Self::Intermediate,
        Self::Good,
        Self::VeryGood,
    ];

    /// Display label as shown to operators.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryPoor => "Very Poor",
            Self::Poor => "Poor",
            Self::Intermediate => "Intermediate",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected threshold configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("thresholds must be strictly increasing, got {0:?}")]
pub struct ThresholdError(pub [f64; 4]);

/// Four strictly increasing boundaries partitioning a metric into the five
/// rating bands.
///
/// Validated once at construction; a ladder can never hold a non-monotonic
/// sequence at rating time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdLadder {
    bounds: [f64; 4],
}

impl ThresholdLadder {
    /// Creates a ladder, rejecting bounds that are not strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when any pair of adjacent bounds fails
    /// `bounds[i] < bounds[i + 1]` (including NaN entries).
    pub fn new(bounds: [f64; 4]) -> Result<Self, ThresholdError> {
        if bounds.windows(2).any(|pair| !(pair[0] < pair[1])) {
            return Err(ThresholdError(bounds));
        }
        Ok(Self { bounds })
    }

    /// The four band boundaries.
    #[must_use]
    pub const fn bounds(&self) -> [f64; 4] {
        self.bounds
    }

    /// Classifies a metric value into a rating band.
    ///
    /// Scans the bounds ascending and returns the band of the first bound
    /// the value falls below. A value exactly equal to a bound belongs to
    /// the higher band; anything past the last bound is [`Rating::VeryGood`].
    #[must_use]
    pub fn rate(&self, value: f64) -> Rating {
        for (index, bound) in self.bounds.iter().enumerate() {
            if value < *bound {
                return Rating::ALL[index];
            }
        }
        Rating::VeryGood
    }
}

/// Per-metric rating ladders.
///
/// The recognized default bands come from calibration against field capture
/// sessions; override them through [`RatingThresholds::from_bounds`] or the
/// CLI configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingThresholds {
    /// Bands for mean luminance (0-255).
    pub lighting: ThresholdLadder,
    /// Bands for variance of the Laplacian.
    pub sharpness: ThresholdLadder,
    /// Bands for center-to-edge luminance separation.
    pub contrast: ThresholdLadder,
}

impl RatingThresholds {
    /// Builds a threshold set from raw bounds, validating each ladder.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] for the first ladder that is not strictly
    /// increasing.
    pub fn from_bounds(
        lighting: [f64; 4],
        sharpness: [f64; 4],
        contrast: [f64; 4],
    ) -> Result<Self, ThresholdError> {
        Ok(Self {
            lighting: ThresholdLadder::new(lighting)?,
            sharpness: ThresholdLadder::new(sharpness)?,
            contrast: ThresholdLadder::new(contrast)?,
        })
    }

    /// The ladder used for a given metric.
    #[must_use]
    pub const fn ladder(&self, kind: MetricKind) -> &ThresholdLadder {
        match kind {
            MetricKind::Lighting => &self.lighting,
            MetricKind::Sharpness => &self.sharpness,
            MetricKind::Contrast => &self.contrast,
        }
    }
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            lighting: ThresholdLadder {
                bounds: [60.0, 90.0, 120.0, 180.0],
            },
            sharpness: ThresholdLadder {
                bounds: [40.0, 80.0, 110.0, 150.0],
            },
            contrast: ThresholdLadder {
                bounds: [15.0, 30.0, 40.0, 60.0],
            },
        }
    }
}
