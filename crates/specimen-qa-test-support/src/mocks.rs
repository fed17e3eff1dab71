//! Mock implementations of the core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use specimen_qa_core::{AnalysisResult, FeedbackSink, Frame, FrameSource};

/// Mock [`FrameSource`] yielding a scripted frame sequence.
///
/// Each pull advances through the script; the final entry repeats forever.
/// `None` entries simulate a source that cannot produce a frame.
pub struct MockFrameSource {
    script: Vec<Option<Frame>>,
    pulls: AtomicUsize,
}

impl MockFrameSource {
    /// Creates a source from a frame script.
    ///
    /// # Panics
    ///
    /// Panics on an empty script.
    #[must_use]
    pub fn new(script: Vec<Option<Frame>>) -> Self {
        assert!(!script.is_empty(), "script must hold at least one entry");
        Self {
            script,
            pulls: AtomicUsize::new(0),
        }
    }

    /// Creates a source that always yields the same frame.
    #[must_use]
    pub fn steady(frame: Frame) -> Self {
        Self::new(vec![Some(frame)])
    }

    /// Number of times the source has been pulled.
    #[must_use]
    pub fn pull_count(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

impl FrameSource for MockFrameSource {
    fn current_frame(&self) -> anyhow::Result<Frame> {
        let pull = self.pulls.fetch_add(1, Ordering::SeqCst);
        let index = pull.min(self.script.len() - 1);
        self.script[index]
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no frame available"))
    }
}

/// Mock [`FeedbackSink`] capturing publications for assertions.
#[derive(Default)]
pub struct MockFeedbackSink {
    published: Mutex<Vec<AnalysisResult>>,
}

impl MockFeedbackSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured publications, in order.
    #[must_use]
    pub fn published(&self) -> Vec<AnalysisResult> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of captured publications.
    #[must_use]
    pub fn publish_count(&self) -> usize {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FeedbackSink for MockFeedbackSink {
    fn publish(&self, result: AnalysisResult) {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }
}
