//! `jobsight config` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::Path;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::loader::{LOCAL_CONFIG_PATH, PROJECT_CONFIG_PATH};

/// Arguments of `jobsight config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration
    Show,
    /// Check that the configuration loads and resolves
    Validate,
}

/// Run a config command against an already loaded and validated configuration.
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    config_path: Option<&Path>,
    json_mode: bool,
) -> Result<()> {
    match args.command {
        ConfigCommands::Show => output(
            &ConfigShowOutput {
                config: config.clone(),
            },
            json_mode,
        ),
        ConfigCommands::Validate => {
            // Rule names and patterns are only fully checked once resolved
            super::analyze::build_analyzer(config).context("Configuration does not resolve")?;
            output(&ConfigValidateOutput::new(config, config_path), json_mode);
        }
    }
    Ok(())
}

/// Output of `jobsight config show`.
#[derive(Debug, serde::Serialize)]
pub struct ConfigShowOutput {
    /// Merged configuration
    pub config: Config,
}

impl CommandOutput for ConfigShowOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config)
            .unwrap_or_else(|e| format!("Failed to render configuration: {e}"))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

/// Output of `jobsight config validate`.
#[derive(Debug, serde::Serialize)]
pub struct ConfigValidateOutput {
    /// Always true; invalid configurations fail before output
    pub valid: bool,
    /// Config files that were read
    pub sources: Vec<String>,
    /// Resolved rule lists
    pub rules: Vec<EngineRules>,
    /// Number of job type definitions
    pub job_types: usize,
}

/// Rule list of one engine.
#[derive(Debug, serde::Serialize)]
pub struct EngineRules {
    /// Normalized engine name
    pub engine: String,
    /// Rule names in evaluation order
    pub rules: Vec<String>,
}

impl ConfigValidateOutput {
    fn new(config: &Config, config_path: Option<&Path>) -> Self {
        let sources = match config_path {
            Some(path) => vec![path.display().to_string()],
            None => [PROJECT_CONFIG_PATH, LOCAL_CONFIG_PATH]
                .into_iter()
                .filter(|path| Path::new(path).exists())
                .map(ToString::to_string)
                .collect(),
        };

        Self {
            valid: true,
            sources,
            rules: config
                .rules
                .iter()
                .map(|(engine, rules)| EngineRules {
                    engine: engine.to_uppercase(),
                    rules: rules.clone(),
                })
                .collect(),
            job_types: config.job_types.len(),
        }
    }
}

impl CommandOutput for ConfigValidateOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["Configuration is valid.".to_string()];

        if self.sources.is_empty() {
            lines.push("Sources: defaults and environment only".to_string());
        } else {
            lines.push(format!("Sources: {}", self.sources.join(", ")));
        }
        lines.push(format!("Job type definitions: {}", self.job_types));

        if self.rules.is_empty() {
            lines.push("No rules configured.".to_string());
        } else {
            let mut table = list_table(&["engine", "rules"]);
            for entry in &self.rules {
                table.add_row(vec![entry.engine.clone(), entry.rules.join(", ")]);
            }
            lines.push(String::new());
            lines.push(table.to_string());
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
