//! Test support for specimen-qa.
//!
//! Synthetic frame builders with known quality characteristics and mock
//! implementations of the core port traits.

pub mod builders;
pub mod mocks;

pub use builders::SyntheticFrameBuilder;
pub use mocks::{MockFeedbackSink, MockFrameSource};
