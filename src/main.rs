//! Jobsight CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use jobsight::cli::commands::{analyze, config};
use jobsight::cli::{handle_error, Cli, Commands};
use jobsight::infrastructure::config::ConfigLoader;
use jobsight::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli.command, cli.config.as_deref(), json_mode) {
        handle_error(err, json_mode);
    }
}

fn run(command: Commands, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let settings = ConfigLoader::load_with(config_path)?;
    let _logger = LoggerImpl::init(&LogConfig::from(&settings.logging))?;

    match command {
        Commands::Analyze(args) => analyze::execute(args, &settings, json_mode),
        Commands::Config(args) => config::execute(args, &settings, config_path, json_mode),
    }
}
