//! Service layer for the analysis pipeline
//!
//! Each service is one stage of turning fetched job data into a
//! diagnostic record:
//! - `rule_registry`: ordered rules per engine type
//! - `rule_evaluation`: the rule loop and the no-data case
//! - `severity_aggregator`: overall severity and score
//! - `record_assembler`: size-bounded record construction
//! - `job_classifier` / `scheduler_info`: configuration-driven collaborators
//! - `analyzer`: the whole pipeline

pub mod analyzer;
pub mod job_classifier;
pub mod record_assembler;
pub mod rule_evaluation;
pub mod rule_registry;
pub mod scheduler_info;
pub mod severity_aggregator;

pub use analyzer::Analyzer;
pub use job_classifier::{ClassifierError, ConfiguredJobTypes};
pub use record_assembler::{AssemblyInput, RecordAssembler};
pub use rule_evaluation::evaluate_rules;
pub use rule_registry::{RegistryError, RuleCatalog, RuleRegistry};
pub use scheduler_info::PropertySchedulerInfo;
pub use severity_aggregator::{overall_score, overall_severity, Verdict};
