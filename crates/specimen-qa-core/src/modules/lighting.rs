//! Lighting metric: mean luminance.

use crate::domain::AnalysisError;
use crate::luminance::Luminance;

/// Arithmetic mean of all luminance samples, in 0-255.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] on an empty buffer.
#[allow(clippy::cast_precision_loss)]
pub fn lighting_mean(luma: &Luminance) -> Result<f64, AnalysisError> {
    if luma.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "empty luminance buffer".to_owned(),
        ));
    }
    let sum: u64 = luma.samples().iter().map(|&s| u64::from(s)).sum();
    Ok(sum as f64 / luma.len() as f64)
}
