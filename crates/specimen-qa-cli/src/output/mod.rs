//! Output adapters for the CLI.

mod json;
mod progress;

pub use json::JsonOutput;
pub use progress::ProgressReporter;
