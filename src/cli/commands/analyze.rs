//! `jobsight analyze` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::output::{list_table, output, truncate, CommandOutput};
use crate::domain::models::{Config, DiagnosticRecord};
use crate::infrastructure::snapshot::{JobSnapshot, RecordedRule, SnapshotData, SnapshotMetrics};
use crate::services::{Analyzer, ConfiguredJobTypes, PropertySchedulerInfo, RuleRegistry};

/// Arguments of `jobsight analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Captured job snapshot (JSON)
    pub file: PathBuf,
}

/// Replay the snapshot at `args.file` and print its record.
pub fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let (job, data) = JobSnapshot::load(&args.file)?.into_parts();

    let record = analyzer
        .analyze(&job, &data)
        .with_context(|| format!("Failed to analyze {}", args.file.display()))?;

    output(&AnalyzeOutput { record }, json_mode);
    Ok(())
}

/// Build the pipeline used to replay snapshots under `config`.
pub fn build_analyzer(config: &Config) -> Result<Analyzer<SnapshotData>> {
    let catalog = RecordedRule::catalog(&config.rules);
    let registry = RuleRegistry::from_config(&catalog, &config.rules)
        .context("Failed to build rule registry")?;
    let job_types = ConfiguredJobTypes::from_config(&config.job_types)
        .context("Failed to compile job type definitions")?;

    Ok(Analyzer::new(registry)
        .with_classifier(Arc::new(job_types))
        .with_aggregator(Arc::new(SnapshotMetrics))
        .with_scheduler_info(Arc::new(PropertySchedulerInfo::new(
            config.scheduler.clone(),
        )))
        .with_field_limits(config.field_limits.clone()))
}

/// Output of `jobsight analyze`.
#[derive(Debug, serde::Serialize)]
pub struct AnalyzeOutput {
    /// Record produced for the snapshot
    pub record: DiagnosticRecord,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        let record = &self.record;
        let mut lines = vec![
            format!("Job: {} ({})", record.id, record.name),
            format!("User: {}  Queue: {}", record.username, record.queue_name),
            format!("Type: {}", record.job_type),
        ];

        if let (Some(start), Some(finish)) = (record.started_at(), record.finished_at()) {
            lines.push(format!(
                "Ran: {} to {} ({}s)",
                start.to_rfc3339(),
                finish.to_rfc3339(),
                record.duration_ms() / 1000
            ));
        }

        lines.push(format!(
            "Resources: used {}  wasted {}  delay {}",
            record.resource_used, record.resource_wasted, record.total_delay
        ));

        if let Some(ref scheduler) = record.scheduler {
            lines.push(format!(
                "Scheduler: {} job {} (flow execution {})",
                scheduler.scheduler, scheduler.job_name, scheduler.flow_exec_id
            ));
        }

        lines.push(format!(
            "Verdict: severity {}  score {}",
            record.severity, record.score
        ));

        if record.findings.is_empty() {
            lines.push("\nNo findings.".to_string());
            return lines.join("\n");
        }

        let mut table = list_table(&["rule", "severity", "score", "details"]);
        for finding in &record.findings {
            let details = finding
                .details
                .iter()
                .map(|d| format!("{}: {}", d.name, truncate(&d.value, 40)))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                finding.rule_name.clone(),
                finding.severity.to_string(),
                finding.score.to_string(),
                details,
            ]);
        }
        lines.push(String::new());
        lines.push(table.to_string());

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.record).unwrap_or_default()
    }
}
