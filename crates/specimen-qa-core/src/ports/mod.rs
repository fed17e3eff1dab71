//! Port definitions for the external collaborators.
//!
//! These traits are the boundary between the analysis core and whatever
//! supplies frames or consumes published results.

mod feedback_sink;
mod frame_source;

pub use feedback_sink::FeedbackSink;
pub use frame_source::FrameSource;
