//! Feedback items and the per-metric message synthesis.

use serde::{Deserialize, Serialize};

use super::{MetricKind, Rating};

/// Feedback severity, mapped by the capture UI to indicator colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The metric needs correction before capturing.
    Warning,
    /// Acceptable, with room for improvement.
    Info,
    /// The metric is in good shape.
    Success,
}

/// One human-readable feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Metric the entry refers to. Absent only for the synthetic entry
    /// substituted when a capture could not be analyzed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricKind>,
    /// Severity bucket.
    pub severity: Severity,
    /// Operator-facing message.
    pub message: String,
}

/// Builds the feedback entry for one metric rating.
///
/// The mapping is fixed and deterministic: the two lowest bands warn with a
/// corrective hint, the middle band informs, the two highest confirm.
#[must_use]
pub fn synthesize(kind: MetricKind, rating: Rating) -> FeedbackItem {
    let (severity, message) = match (kind, rating) {
        (MetricKind::Lighting, Rating::VeryPoor | Rating::Poor) => {
            (Severity::Warning, "Image too dark - increase lighting")
        }
        (MetricKind::Lighting, Rating::Intermediate) => (
            Severity::Info,
            "Lighting acceptable but could be improved",
        ),
        (MetricKind::Lighting, Rating::Good | Rating::VeryGood) => {
            (Severity::Success, "Lighting quality is good")
        }
        (MetricKind::Sharpness, Rating::VeryPoor | Rating::Poor) => {
            (Severity::Warning, "Image is blurry - hold camera steady")
        }
        (MetricKind::Sharpness, Rating::Intermediate) => {
            (Severity::Info, "Sharpness moderate - consider refocusing")
        }
        (MetricKind::Sharpness, Rating::Good | Rating::VeryGood) => {
            (Severity::Success, "Sharpness is good")
        }
        (MetricKind::Contrast, Rating::VeryPoor | Rating::Poor) => (
            Severity::Warning,
            "Low contrast - adjust lighting or exposure",
        ),
        (MetricKind::Contrast, Rating::Intermediate) => (
            Severity::Info,
            "Contrast acceptable but could be improved",
        ),
        (MetricKind::Contrast, Rating::Good | Rating::VeryGood) => {
            (Severity::Success, "Contrast is good")
        }
    };

    FeedbackItem {
        metric: Some(kind),
        severity,
        message: message.to_owned(),
    }
}

/// The single entry substituted when an explicit capture cannot be analyzed.
#[must_use]
pub fn analysis_failed() -> FeedbackItem {
    FeedbackItem {
        metric: None,
        severity: Severity::Warning,
        message: "could not analyze image".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_band_per_metric() {
        for rating in [Rating::VeryPoor, Rating::Poor] {
            let lighting = synthesize(MetricKind::Lighting, rating);
            assert_eq!(lighting.severity, Severity::Warning);
            assert!(lighting.message.contains("dark"));

            let sharpness = synthesize(MetricKind::Sharpness, rating);
            assert_eq!(sharpness.severity, Severity::Warning);
            assert!(sharpness.message.contains("blur"));

            let contrast = synthesize(MetricKind::Contrast, rating);
            assert_eq!(contrast.severity, Severity::Warning);
            assert!(contrast.message.contains("contrast"));
        }
    }

    #[test]
    fn test_info_band() {
        for kind in MetricKind::ALL {
            let item = synthesize(kind, Rating::Intermediate);
            assert_eq!(item.severity, Severity::Info);
            assert_eq!(item.metric, Some(kind));
        }
    }

    #[test]
    fn test_success_band() {
        for kind in MetricKind::ALL {
            for rating in [Rating::Good, Rating::VeryGood] {
                let item = synthesize(kind, rating);
                assert_eq!(item.severity, Severity::Success);
                assert!(item.message.contains("good"));
            }
        }
    }

    #[test]
    fn test_analysis_failed_entry() {
        let item = analysis_failed();
        assert_eq!(item.metric, None);
        assert_eq!(item.severity, Severity::Warning);
        assert_eq!(item.message, "could not analyze image");
    }

    #[test]
    fn test_synthetic_entry_omits_metric_field() {
        let json = serde_json::to_value(analysis_failed()).expect("serializable");
        assert!(json.get("metric").is_none());
    }
}
