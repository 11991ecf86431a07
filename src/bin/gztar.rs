//! Gztar CLI Binary
//!
//! Command-line interface for inspecting and repacking `.tar.gz` archives.

use clap::Parser;
use gztar::logging::{init_logging, LoggingConfig};
use gztar::TarballError;
use gztar::tooling::cli::{Cli, CliContext};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = apply_log_flags(&cli, context.config().logging.clone());
    if let Err(e) = logging.and_then(|logging| init_logging(Some(&logging))) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn apply_log_flags(cli: &Cli, mut logging: LoggingConfig) -> Result<LoggingConfig, TarballError> {
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.parse()?;
    }
    Ok(logging)
}
