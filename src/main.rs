//! schelm - split rendered templates into files
//!
//! Reads a concatenated stream of YAML documents, each introduced by a
//! `---\n# Source: <path>` marker as printed by `helm template`, and writes every
//! document to `<OUTPUT_DIR>/<path>`. Documents sharing a path end up in the same
//! file, separated by `---`.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod stream;

use cli::Cli;
use config::RunConfig;
use error::SchelmError;
use logging::LogConfig;

/// Print the error and its hint, then exit with status 1
fn fail(e: &SchelmError) -> ! {
    eprintln!("Error: {e}");
    if let Some(help) = e.help() {
        eprintln!("  help: {help}");
    }
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(LogConfig::from_cli(&cli)) {
        fail(&e);
    }

    let config = RunConfig::from_cli(&cli);
    if let Err(e) = commands::split::run(&config) {
        fail(&e);
    }
}
