//! Command-line interface.
//!
//! `jobsight analyze <FILE>` replays a captured job snapshot through the
//! analysis pipeline; `jobsight config` shows or validates the merged
//! configuration.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::analyze::AnalyzeArgs;
use commands::config::ConfigArgs;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "jobsight")]
#[command(about = "Jobsight - diagnostic verdicts for completed cluster jobs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of .jobsight/config.yaml and .jobsight/local.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a captured job snapshot
    Analyze(AnalyzeArgs),

    /// Configuration commands
    Config(ConfigArgs),
}

/// Print an error and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": &chain[1..],
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| err.to_string())
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
