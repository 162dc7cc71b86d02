//! # oddgen CLI entry point

use clap::Parser;
use oddgen::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.env_filter())
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(files) => {
            tracing::info!(files = files.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
