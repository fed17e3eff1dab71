//! Check command - analyze captured images and emit quality records.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use specimen_qa_adapters::FsFrameSource;
use specimen_qa_core::{AnalysisResult, QualityAnalyzer};
use tracing::info;

use super::{iso_timestamp, ExitCode, ThresholdArgs};
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressReporter};

/// Output format for records.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Shared arguments for capture analysis.
#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Capture files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Threshold overrides.
    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Thresholds: CLI > config (build() provides hardcoded fallback)
        args.thresholds.apply_config(config);

        // Output format: CLI > config (accessor provides fallback)
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// One persisted record per analyzed capture.
///
/// The metrics map and feedback list are the opaque structured data the
/// upload builder stores alongside the image.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureRecord {
    /// Path of the capture file.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Capture width in pixels.
    pub width: u32,
    /// Capture height in pixels.
    pub height: u32,
    /// Metrics and feedback of the analysis.
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckSummary {
    /// Number of captures analyzed.
    pub processed: usize,
    /// Number of files skipped.
    pub skipped: usize,
    /// Number of captures with warning feedback.
    pub with_warnings: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first to
/// apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckSummary> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let analyzer = QualityAnalyzer::new(args.thresholds.build()?);

    let source = FsFrameSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressReporter::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut with_warnings = 0usize;
    let mut all_records: Vec<CaptureRecord> = Vec::new();

    for capture in source.frames() {
        let capture = match capture {
            Ok(capture) => capture,
            Err(e) => {
                progress.skipped(&format!("{e:#}"));
                skipped += 1;
                continue;
            }
        };

        progress.started(&capture.path);

        // A failed analysis degrades to fallback feedback inside capture();
        // a bad file never aborts the batch.
        let analysis = analyzer.capture(&capture.frame);
        let warnings = analysis
            .feedback
            .iter()
            .filter(|item| item.severity == specimen_qa_core::Severity::Warning)
            .count();
        if warnings > 0 {
            with_warnings += 1;
        }

        let record = CaptureRecord {
            path: capture.path,
            timestamp: iso_timestamp(),
            width: capture.frame.width,
            height: capture.frame.height,
            analysis,
        };

        progress.completed(&record.path, warnings);

        match args.format() {
            OutputFormat::Jsonl => output.write(&record)?,
            OutputFormat::Json => all_records.push(record),
        }

        processed += 1;
    }

    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_records, args.pretty)?;
    }
    output.flush()?;

    progress.finished(processed, skipped);

    let exit_code = if with_warnings > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckSummary {
        processed,
        skipped,
        with_warnings,
        exit_code,
    })
}
