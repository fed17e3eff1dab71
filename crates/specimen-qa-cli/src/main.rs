//! Specimen QA CLI - capture quality analysis for field collection.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = match cli.command {
        Some(Commands::Check(ref args)) => run_check(args),
        Some(Commands::Monitor(ref args)) => {
            let config = config::AppConfig::load();
            let args = commands::monitor::MonitorArgs::with_config(args.clone(), &config);
            match commands::monitor::run(&args) {
                Ok(()) => ExitCode::Success,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::Error
                }
            }
        }
        None => {
            // Default behavior: run check with the flattened args
            if cli.check.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_check(&cli.check)
        }
    };

    exit_code.into()
}

fn run_check(args: &commands::check::CheckArgs) -> ExitCode {
    let config = config::AppConfig::load();
    let args = commands::check::CheckArgs::with_config(args.clone(), &config);
    match commands::check::run(&args) {
        Ok(summary) => summary.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
