//! Sharpness metric: variance of the Laplacian, center-weighted.
//!
//! Focus quality shows up as spread in the discrete second-derivative
//! response. Sampling is restricted to the central 50% x 50% window so that
//! out-of-focus backgrounds and frame edges do not bias the statistic.

use crate::domain::AnalysisError;
use crate::luminance::Luminance;

/// Population variance of the 4-neighbor Laplacian over the center window.
///
/// The window spans `[w/4, 3w/4) x [h/4, 3h/4)`; the outermost pixel ring of
/// the image is excluded (no padding). Each response is
/// `-4*center + top + bottom + left + right`. The variance divides by N,
/// not N-1.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientResolution`] when the window
/// contains no valid interior pixel.
#[allow(clippy::cast_precision_loss)]
pub fn sharpness_variance(luma: &Luminance) -> Result<f64, AnalysisError> {
    let width = luma.width() as usize;
    let height = luma.height() as usize;

    let cx0 = width / 4;
    let cx1 = 3 * width / 4;
    let cy0 = height / 4;
    let cy1 = 3 * height / 4;

    let mut responses = Vec::new();
    for y in cy0..cy1.saturating_sub(1) {
        if y < 1 || y + 1 >= height {
            continue;
        }
        for x in cx0..cx1.saturating_sub(1) {
            if x < 1 || x + 1 >= width {
                continue;
            }
            let center = i32::from(luma.sample(x, y));
            let top = i32::from(luma.sample(x, y - 1));
            let bottom = i32::from(luma.sample(x, y + 1));
            let left = i32::from(luma.sample(x - 1, y));
            let right = i32::from(luma.sample(x + 1, y));
            let laplacian = -4 * center + top + bottom + left + right;
            responses.push(f64::from(laplacian));
        }
    }

    if responses.is_empty() {
        return Err(AnalysisError::InsufficientResolution(format!(
            "no interior pixels in the {width}x{height} center window"
        )));
    }

    let count = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / count;
    let variance = responses
        .iter()
        .map(|response| (response - mean).powi(2))
        .sum::<f64>()
        / count;
    Ok(variance)
}
