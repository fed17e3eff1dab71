//! Configuration file support for specimen-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/specimen-qa/config.toml` (lowest priority)
//! - Project-local: `.specimen-qa.toml` (searched up the directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use specimen_qa_core::ThresholdLadder;
use tracing::{debug, info, warn};

/// Project-local configuration file name.
const PROJECT_CONFIG_NAME: &str = ".specimen-qa.toml";

/// Minimum accepted monitor interval.
const MIN_INTERVAL_MS: u64 = 100;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Rating threshold ladders.
    pub thresholds: ThresholdsConfig,
    /// Realtime monitoring settings.
    pub monitor: MonitorConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Rating threshold configuration, four increasing values per metric.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Lighting ladder.
    pub lighting: Option<[f64; 4]>,
    /// Sharpness ladder.
    pub sharpness: Option<[f64; 4]>,
    /// Contrast ladder.
    pub contrast: Option<[f64; 4]>,
}

/// Realtime monitoring configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Milliseconds between analysis ticks.
    pub interval_ms: Option<u64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/specimen-qa/config.toml`
    /// 2. Project-local: `.specimen-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        for (name, ladder) in [
            ("thresholds.lighting", self.thresholds.lighting),
            ("thresholds.sharpness", self.thresholds.sharpness),
            ("thresholds.contrast", self.thresholds.contrast),
        ] {
            if let Some(bounds) = ladder {
                ThresholdLadder::new(bounds).map_err(|e| format!("{name}: {e}"))?;
            }
        }

        if let Some(interval) = self.monitor.interval_ms {
            if interval < MIN_INTERVAL_MS {
                return Err(format!(
                    "monitor.interval_ms must be at least {MIN_INTERVAL_MS}, got {interval}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.thresholds.lighting = other.thresholds.lighting.or(self.thresholds.lighting);
        self.thresholds.sharpness = other.thresholds.sharpness.or(self.thresholds.sharpness);
        self.thresholds.contrast = other.thresholds.contrast.or(self.thresholds.contrast);

        self.monitor.interval_ms = other.monitor.interval_ms.or(self.monitor.interval_ms);

        self.output.format = other.output.format.or(self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// XDG configuration file path.
fn xdg_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("specimen-qa").join("config.toml"))
}

/// Searches for `.specimen-qa.toml` from the working directory upward.
fn find_project_config() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(PROJECT_CONFIG_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Parses one TOML config file, logging failures.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read config {}: {e}", path.display());
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config {}: {e}", path.display());
            None
        }
    }
}
