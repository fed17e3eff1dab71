//! Metric extractors.
//!
//! Three independent pure functions over a luminance buffer, one per
//! quality dimension.

mod contrast;
mod lighting;
mod sharpness;

pub use contrast::contrast_separation;
pub use lighting::lighting_mean;
pub use sharpness::sharpness_variance;
