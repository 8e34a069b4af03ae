//! Loadout CLI Binary
//!
//! Command-line interface for capability composition and agent
//! configuration management.

use clap::Parser;
use loadout::config::ConfigLoader;
use loadout::logging;
use loadout::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match ConfigLoader::load_from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config from {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => match ConfigLoader::load(&cli.workspace) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
    };

    // CLI flags override config file settings; LOADOUT_* env vars still win
    // inside init_logging.
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }

    if let Err(e) = logging::init_logging(Some(&config.logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = match CliContext::with_config(&cli.workspace, &config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing workspace: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
