//! Progress reporting using indicatif.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress reporter for the batch check path.
///
/// Shows a bar when requested and stderr is a terminal; otherwise prints
/// per-capture status lines, or nothing in quiet mode.
pub struct ProgressReporter {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Creates a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of captures, if known
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show a progress bar
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self {
                bar: None,
                quiet: true,
            };
        }

        let bar = if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);

            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }

            Some(bar)
        } else {
            None
        };

        Self { bar, quiet }
    }

    /// A capture is being analyzed.
    pub fn started(&self, path: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(path.to_owned());
        }
    }

    /// A capture finished with the given number of warnings.
    pub fn completed(&self, path: &str, warnings: usize) {
        if self.quiet {
            return;
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
        } else if warnings > 0 {
            eprintln!("{path}: {warnings} warning(s)");
        }
    }

    /// A file was skipped.
    pub fn skipped(&self, reason: &str) {
        if self.quiet {
            return;
        }
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        eprintln!("WARN: Skipping: {reason}");
    }

    /// The batch is done.
    pub fn finished(&self, processed: usize, skipped: usize) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("Done: {processed} processed, {skipped} skipped"));
        }
    }
}
