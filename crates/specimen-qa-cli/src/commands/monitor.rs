//! Monitor command - drive the realtime sampler against a snapshot file.
//!
//! The snapshot is an image file that an external camera process keeps
//! overwriting; published quality updates stream to stdout as JSON Lines.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use specimen_qa_adapters::SnapshotFrameSource;
use specimen_qa_core::{
    AnalysisResult, FeedbackSink, QualityAnalyzer, RealtimeSampler, DEFAULT_TICK_INTERVAL,
};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use super::ThresholdArgs;
use crate::config::AppConfig;

/// Arguments for live monitoring.
#[derive(Args, Clone)]
pub struct MonitorArgs {
    /// Snapshot image the camera process keeps overwriting
    pub snapshot: PathBuf,

    /// Milliseconds between analysis ticks
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many published updates (0 = run until Ctrl-C)
    #[arg(long, default_value_t = 0)]
    pub updates: usize,

    /// Threshold overrides.
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl MonitorArgs {
    /// Apply configuration file values, respecting CLI precedence.
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.interval_ms = args.interval_ms.or(config.monitor.interval_ms);
        args.thresholds.apply_config(config);
        args
    }

    fn interval(&self) -> Duration {
        self.interval_ms
            .map_or(DEFAULT_TICK_INTERVAL, Duration::from_millis)
    }
}

/// One streamed update per publication.
#[derive(Debug, Serialize)]
struct MonitorRecord {
    /// Timestamp of publication (ISO 8601).
    timestamp: String,
    /// Metrics and feedback of the analysis.
    #[serde(flatten)]
    analysis: AnalysisResult,
}

/// Streams publications to stdout and tracks the update limit.
struct StreamSink {
    limit: usize,
    published: AtomicUsize,
    notify: Notify,
}

impl StreamSink {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            published: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    /// Resolves once the configured update limit is reached; pends forever
    /// when no limit is set.
    async fn limit_reached(&self) {
        if self.limit == 0 {
            std::future::pending::<()>().await;
        }
        loop {
            let notified = self.notify.notified();
            if self.published.load(Ordering::SeqCst) >= self.limit {
                return;
            }
            notified.await;
        }
    }
}

impl FeedbackSink for StreamSink {
    fn publish(&self, result: AnalysisResult) {
        let record = MonitorRecord {
            timestamp: super::iso_timestamp(),
            analysis: result,
        };
        match serde_json::to_string(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!("Failed to serialize update: {e}"),
        }
        self.published.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }
}

/// Run the monitor command.
///
/// Expects `args` to have been processed through `with_config()` first to
/// apply configuration file settings.
pub fn run(args: &MonitorArgs) -> Result<()> {
    let analyzer = QualityAnalyzer::new(args.thresholds.build()?);
    let interval = args.interval();
    info!(
        "Monitoring {} every {}ms",
        args.snapshot.display(),
        interval.as_millis()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut sampler = RealtimeSampler::new(analyzer).with_interval(interval);
        let source = Arc::new(SnapshotFrameSource::new(args.snapshot.clone()));
        let sink = Arc::new(StreamSink::new(args.updates));

        sampler.start(source, Arc::clone(&sink) as Arc<dyn FeedbackSink>);

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping sampler");
            }
            () = sink.limit_reached() => {
                debug!("Update limit reached, stopping sampler");
            }
        }

        sampler.stop();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_defaults_to_one_second() {
        let args = MonitorArgs {
            snapshot: PathBuf::from("latest.png"),
            interval_ms: None,
            updates: 0,
            thresholds: ThresholdArgs::default(),
        };
        assert_eq!(args.interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_interval_from_config_when_cli_unset() {
        let args = MonitorArgs {
            snapshot: PathBuf::from("latest.png"),
            interval_ms: None,
            updates: 0,
            thresholds: ThresholdArgs::default(),
        };
        let mut config = AppConfig::default();
        config.monitor.interval_ms = Some(250);

        let merged = MonitorArgs::with_config(args, &config);
        assert_eq!(merged.interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_cli_interval_beats_config() {
        let args = MonitorArgs {
            snapshot: PathBuf::from("latest.png"),
            interval_ms: Some(500),
            updates: 0,
            thresholds: ThresholdArgs::default(),
        };
        let mut config = AppConfig::default();
        config.monitor.interval_ms = Some(250);

        let merged = MonitorArgs::with_config(args, &config);
        assert_eq!(merged.interval(), Duration::from_millis(500));
    }
}
