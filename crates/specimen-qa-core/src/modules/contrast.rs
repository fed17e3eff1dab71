//! Contrast metric: center-to-edge luminance separation.
//!
//! A specimen shot against a plain ground should separate a central disk
//! from the outer frame in brightness; low separation signals poor framing
//! or a ground that matches the specimen in tone.

use crate::domain::AnalysisError;
use crate::luminance::Luminance;

/// Radius of the center disk, as a fraction of the shorter dimension.
const CENTER_RADIUS_RATIO: f64 = 0.3;
/// Edge pixels start at this multiple of the center radius; the annulus
/// between is a dead zone with ambiguous membership.
const EDGE_RADIUS_FACTOR: f64 = 1.5;

/// Absolute difference between mean center-disk and mean edge luminance.
///
/// Pixels closer than `0.3 * min(w, h)` to the frame center form the center
/// set, pixels farther than 1.5 times that radius the edge set; the annulus
/// between belongs to neither.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientResolution`] when either set is
/// empty.
#[allow(clippy::cast_precision_loss)]
pub fn contrast_separation(luma: &Luminance) -> Result<f64, AnalysisError> {
    let width = luma.width() as usize;
    let height = luma.height() as usize;

    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let radius = CENTER_RADIUS_RATIO * width.min(height) as f64;
    let edge_radius = EDGE_RADIUS_FACTOR * radius;

    let mut center_sum = 0u64;
    let mut center_count = 0u64;
    let mut edge_sum = 0u64;
    let mut edge_count = 0u64;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - center_x;
            let dy = y as f64 - center_y;
            let distance = (dx * dx + dy * dy).sqrt();
            let sample = u64::from(luma.sample(x, y));

            if distance < radius {
                center_sum += sample;
                center_count += 1;
            } else if distance > edge_radius {
                edge_sum += sample;
                edge_count += 1;
            }
        }
    }

    if center_count == 0 || edge_count == 0 {
        return Err(AnalysisError::InsufficientResolution(format!(
            "{width}x{height} frame leaves the center or edge region empty"
        )));
    }

    let center_mean = center_sum as f64 / center_count as f64;
    let edge_mean = edge_sum as f64 / edge_count as f64;
    Ok((center_mean - edge_mean).abs())
}
