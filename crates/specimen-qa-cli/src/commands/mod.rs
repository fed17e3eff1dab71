//! CLI command definitions and handlers.

pub mod check;
pub mod monitor;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use specimen_qa_core::RatingThresholds;
use tracing::debug;

use crate::config::AppConfig;

/// Specimen QA - capture quality analysis for field collection
#[derive(Parser)]
#[command(name = "specimen-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze captured images and emit quality records
    Check(check::CheckArgs),
    /// Watch a live snapshot file and stream quality updates
    Monitor(monitor::MonitorArgs),
}

/// Process exit codes for scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// All captures analyzed without warnings.
    Success,
    /// At least one capture produced warning feedback.
    IssuesFound,
    /// The command itself failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::IssuesFound => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Parse a rating ladder: four comma-separated, strictly increasing values.
fn parse_ladder(s: &str) -> Result<[f64; 4], String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| format!("'{part}' is not a valid number"))
        })
        .collect::<Result<_, String>>()?;

    let bounds: [f64; 4] = values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected 4 thresholds, got {}", v.len()))?;

    specimen_qa_core::ThresholdLadder::new(bounds).map_err(|e| e.to_string())?;
    Ok(bounds)
}

/// Threshold ladder overrides shared by `check` and `monitor`.
#[derive(Args, Clone, Default)]
pub struct ThresholdArgs {
    /// Lighting rating thresholds, four increasing values
    #[arg(long, value_name = "T0,T1,T2,T3", value_parser = parse_ladder)]
    pub lighting_thresholds: Option<[f64; 4]>,

    /// Sharpness rating thresholds, four increasing values
    #[arg(long, value_name = "T0,T1,T2,T3", value_parser = parse_ladder)]
    pub sharpness_thresholds: Option<[f64; 4]>,

    /// Contrast rating thresholds, four increasing values
    #[arg(long, value_name = "T0,T1,T2,T3", value_parser = parse_ladder)]
    pub contrast_thresholds: Option<[f64; 4]>,
}

impl ThresholdArgs {
    /// Fills unset ladders from the configuration file.
    pub fn apply_config(&mut self, config: &AppConfig) {
        self.lighting_thresholds = self.lighting_thresholds.or(config.thresholds.lighting);
        self.sharpness_thresholds = self.sharpness_thresholds.or(config.thresholds.sharpness);
        self.contrast_thresholds = self.contrast_thresholds.or(config.thresholds.contrast);
    }

    /// Builds the threshold set, falling back to the recognized defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when an override ladder is not strictly increasing.
    pub fn build(&self) -> Result<RatingThresholds> {
        let defaults = RatingThresholds::default();
        let thresholds = RatingThresholds::from_bounds(
            self.lighting_thresholds
                .unwrap_or_else(|| defaults.lighting.bounds()),
            self.sharpness_thresholds
                .unwrap_or_else(|| defaults.sharpness.bounds()),
            self.contrast_thresholds
                .unwrap_or_else(|| defaults.contrast.bounds()),
        )?;
        Ok(thresholds)
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
pub(crate) fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
