//! The realtime sampling loop.
//!
//! An explicit two-state machine (`Idle`/`Sampling`) that owns a
//! cancellable periodic timer and the last-published rating snapshot. Each
//! tick pulls the current frame, runs the full pipeline, and publishes only
//! when the rating triple changed since the last publication.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::analyzer::QualityAnalyzer;
use crate::domain::{MetricKind, Rating};
use crate::ports::{FeedbackSink, FrameSource};

/// Default spacing between analysis ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Sampler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// No active frame source; nothing is scheduled.
    Idle,
    /// Ticking against an active frame source.
    Sampling,
}

/// Last published rating triple, compared per tick to suppress flicker.
type RatingSnapshot = Vec<(MetricKind, Rating)>;

struct Session {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Periodic driver for the analysis pipeline.
///
/// At most one analysis is in flight at any time: the tick body runs to
/// completion inside the sampling task, and ticks that fall due while one
/// is still running are skipped, never queued. Stopping cancels scheduling
/// immediately; an analysis already underway finishes but its result is
/// discarded.
pub struct RealtimeSampler {
    analyzer: Arc<QualityAnalyzer>,
    interval: Duration,
    session: Option<Session>,
}

impl RealtimeSampler {
    /// Creates an idle sampler with the default tick interval.
    #[must_use]
    pub fn new(analyzer: QualityAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            interval: DEFAULT_TICK_INTERVAL,
            session: None,
        }
    }

    /// Overrides the tick interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SamplerState {
        if self.session.is_some() {
            SamplerState::Sampling
        } else {
            SamplerState::Idle
        }
    }

    /// Transitions `Idle` -> `Sampling`.
    ///
    /// Resets the rating snapshot and begins ticking against `source`,
    /// publishing changes to `sink`. Calling this while already sampling is
    /// a no-op. The first tick fires one full interval after the start.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(&mut self, source: Arc<dyn FrameSource>, sink: Arc<dyn FeedbackSink>) {
        if self.session.is_some() {
            debug!("sampler already active, start ignored");
            return;
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_loop(
            Arc::clone(&self.analyzer),
            source,
            sink,
            self.interval,
            cancel.clone(),
        ));
        self.session = Some(Session { cancel, task });
    }

    /// Transitions `Sampling` -> `Idle`.
    ///
    /// Scheduling stops synchronously: no further tick begins after this
    /// call returns. An in-flight analysis is not aborted; its result is
    /// discarded by the cancellation check ahead of publication. Calling
    /// this while idle is a no-op.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel.cancel();
            drop(session.task);
        }
    }
}

impl Drop for RealtimeSampler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    analyzer: Arc<QualityAnalyzer>,
    source: Arc<dyn FrameSource>,
    sink: Arc<dyn FeedbackSink>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let start = tokio::time::Instant::now() + interval;
    let mut ticker = tokio::time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut snapshot: Option<RatingSnapshot> = None;

    loop {
        tokio::select! {
            // Cancellation is checked ahead of the timer so a tick that
            // falls due together with stop() never runs.
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                tick(&analyzer, source.as_ref(), sink.as_ref(), &cancel, &mut snapshot);
            }
        }
    }
}

/// One sampling tick: pull, analyze, dedup, publish.
fn tick(
    analyzer: &QualityAnalyzer,
    source: &dyn FrameSource,
    sink: &dyn FeedbackSink,
    cancel: &CancellationToken,
    snapshot: &mut Option<RatingSnapshot>,
) {
    let frame = match source.current_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("frame unavailable, tick skipped: {e:#}");
            return;
        }
    };

    let result = match analyzer.analyze(&frame) {
        Ok(result) => result,
        Err(e) => {
            warn!("analysis failed, tick skipped: {e}");
            return;
        }
    };

    // The source may have stopped while the analysis ran.
    if cancel.is_cancelled() {
        debug!("sampling stopped mid-analysis, result discarded");
        return;
    }

    let ratings = result.ratings();
    if snapshot.as_ref() == Some(&ratings) {
        debug!("ratings unchanged, publication suppressed");
        return;
    }

    *snapshot = Some(ratings);
    sink.publish(result);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{AnalysisResult, Frame};

    fn uniform_frame(value: u8) -> Frame {
        let data = [value, value, value, 255].repeat(64 * 64);
        Frame::new(64, 64, data)
    }

    /// Yields scripted frames in order, repeating the last one forever.
    /// `None` entries simulate an unreadable source.
    struct ScriptedSource {
        script: Vec<Option<Frame>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Option<Frame>>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn current_frame(&self) -> anyhow::Result<Frame> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let index = call.min(self.script.len() - 1);
            self.script[index]
                .clone()
                .ok_or_else(|| anyhow::anyhow!("no frame available"))
        }
    }

    struct RecordingSink {
        published: Mutex<Vec<AnalysisResult>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                published: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.published.lock().expect("sink lock").len()
        }
    }

    impl FeedbackSink for RecordingSink {
        fn publish(&self, result: AnalysisResult) {
            self.published.lock().expect("sink lock").push(result);
        }
    }

    async fn settle(intervals: f64) {
        tokio::time::sleep(Duration::from_millis((1000.0 * intervals) as u64)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_ratings_published_once() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        let source = Arc::new(ScriptedSource::new(vec![Some(uniform_frame(0))]));
        let sink = Arc::new(RecordingSink::new());

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(4.5).await;
        sampler.stop();

        // Four ticks analyzed the same frame; only the first published.
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rating_change_is_published() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        // Two dark ticks, then a bright frame: the lighting rating flips.
        let source = Arc::new(ScriptedSource::new(vec![
            Some(uniform_frame(0)),
            Some(uniform_frame(0)),
            Some(uniform_frame(255)),
        ]));
        let sink = Arc::new(RecordingSink::new());

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(3.5).await;
        sampler.stop();

        assert_eq!(sink.count(), 2);
        let published = sink.published.lock().expect("sink lock");
        assert_ne!(published[0].ratings(), published[1].ratings());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_scheduling() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        let source = Arc::new(ScriptedSource::new(vec![
            Some(uniform_frame(0)),
            Some(uniform_frame(255)),
            Some(uniform_frame(0)),
        ]));
        let sink = Arc::new(RecordingSink::new());

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(1.5).await;
        sampler.stop();
        assert_eq!(sampler.state(), SamplerState::Idle);

        settle(3.0).await;
        assert_eq!(sink.count(), 1, "no tick may run after stop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_reset_on_restart() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        let sink = Arc::new(RecordingSink::new());

        let source = Arc::new(ScriptedSource::new(vec![Some(uniform_frame(0))]));
        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(1.5).await;
        sampler.stop();
        assert_eq!(sink.count(), 1);

        // Same ratings as before, but a fresh session starts with an empty
        // snapshot, so the first tick publishes again.
        let source = Arc::new(ScriptedSource::new(vec![Some(uniform_frame(0))]));
        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(1.5).await;
        sampler.stop();
        assert_eq!(sink.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_error_skips_tick() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        let source = Arc::new(ScriptedSource::new(vec![None, Some(uniform_frame(128))]));
        let sink = Arc::new(RecordingSink::new());

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(2.5).await;
        sampler.stop();

        // First tick failed to read a frame; the loop kept going.
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_error_skips_tick() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        // A 1x1 frame fails the sharpness extractor; the loop survives it.
        let tiny = Frame::new(1, 1, vec![128, 128, 128, 255]);
        let source = Arc::new(ScriptedSource::new(vec![
            Some(tiny),
            Some(uniform_frame(128)),
        ]));
        let sink = Arc::new(RecordingSink::new());

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        settle(2.5).await;
        sampler.stop();

        assert_eq!(sink.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_sampling_is_noop() {
        let mut sampler = RealtimeSampler::new(QualityAnalyzer::default());
        let sink = Arc::new(RecordingSink::new());

        let source = Arc::new(ScriptedSource::new(vec![Some(uniform_frame(0))]));
        sampler.start(
            Arc::clone(&source) as Arc<dyn FrameSource>,
            Arc::clone(&sink) as Arc<dyn FeedbackSink>,
        );
        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);
        assert_eq!(sampler.state(), SamplerState::Sampling);

        settle(1.5).await;
        sampler.stop();
        assert_eq!(sink.count(), 1, "a second start must not double ticks");
    }

    #[test]
    fn test_discard_if_stopped() {
        // A result that resolves after cancellation must neither publish
        // nor update the snapshot.
        let analyzer = QualityAnalyzer::default();
        let source = ScriptedSource::new(vec![Some(uniform_frame(0))]);
        let sink = RecordingSink::new();
        let cancel = CancellationToken::new();
        let mut snapshot: Option<RatingSnapshot> = None;

        cancel.cancel();
        tick(&analyzer, &source, &sink, &cancel, &mut snapshot);

        assert_eq!(sink.count(), 0);
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_tick_publishes_and_records_snapshot() {
        let analyzer = QualityAnalyzer::default();
        let source = ScriptedSource::new(vec![Some(uniform_frame(0))]);
        let sink = RecordingSink::new();
        let cancel = CancellationToken::new();
        let mut snapshot: Option<RatingSnapshot> = None;

        tick(&analyzer, &source, &sink, &cancel, &mut snapshot);

        assert_eq!(sink.count(), 1);
        let snapshot = snapshot.expect("snapshot recorded");
        assert_eq!(snapshot.len(), 3);
    }
}
