//! Retrace Application
//!
//! Command-line front end for camera trajectory playback.
//!
//! Features:
//! - Trigger file generation (start, mid, end or custom frame alignment)
//! - Input inspection with spline domain checks
//! - Headless playback writing one pose per trigger (JSON, CSV or GPU uniforms)
//! - Batched path sampling for previews

mod app;
mod cli;
mod errors;
mod output;

use clap::Parser;

use crate::app::LoggingConfig;
use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    LoggingConfig::from_cli(&cli).init();

    if let Err(e) = app::run(cli) {
        tracing::error!("{}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
