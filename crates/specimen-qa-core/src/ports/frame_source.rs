//! Frame source port: the camera-side collaborator.

use crate::domain::Frame;

/// Supplies the most recent frame from an active capture device.
pub trait FrameSource: Send + Sync {
    /// Returns the current frame.
    ///
    /// # Errors
    ///
    /// Returns an error when no frame can be produced (device gone,
    /// snapshot unreadable). The sampler logs the error and skips the tick.
    fn current_frame(&self) -> anyhow::Result<Frame>;
}
