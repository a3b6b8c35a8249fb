//! Configured job type classifier.
//!
//! Classifies a job by checking its configuration properties against the
//! `job_types` definitions of the configuration. Definitions are grouped by
//! engine type and checked in declaration order; the first definition whose
//! property is set and whose pattern matches the whole value wins.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use crate::domain::models::{EngineType, JobType, JobTypeConfig};
use crate::domain::ports::{JobConfiguration, JobTypeClassifier};

/// Errors raised while compiling job type definitions.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A definition is missing its name, engine, or property.
    #[error("Job type definition #{index} has an empty {field}")]
    EmptyField {
        /// Position in the `job_types` list
        index: usize,
        /// Name of the empty field
        field: &'static str,
    },

    /// A definition's pattern does not compile.
    #[error("Invalid pattern for job type '{name}': {source}")]
    InvalidPattern {
        /// Job type name
        name: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
struct JobTypeMatcher {
    job_type: JobType,
    property: String,
    pattern: Regex,
}

impl JobTypeMatcher {
    fn matches<D: JobConfiguration + ?Sized>(&self, data: &D) -> bool {
        data.property(&self.property)
            .is_some_and(|value| self.pattern.is_match(value))
    }
}

/// Job type classifier built from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredJobTypes {
    by_engine: HashMap<EngineType, Vec<JobTypeMatcher>>,
}

impl ConfiguredJobTypes {
    /// Compile job type definitions. Patterns are anchored at both ends.
    pub fn from_config(definitions: &[JobTypeConfig]) -> Result<Self, ClassifierError> {
        let mut by_engine: HashMap<EngineType, Vec<JobTypeMatcher>> = HashMap::new();

        for (index, definition) in definitions.iter().enumerate() {
            for (field, value) in [
                ("name", &definition.name),
                ("engine", &definition.engine),
                ("property", &definition.property),
            ] {
                if value.trim().is_empty() {
                    return Err(ClassifierError::EmptyField { index, field });
                }
            }

            let pattern = Regex::new(&format!("^(?:{})$", definition.pattern)).map_err(
                |source| ClassifierError::InvalidPattern {
                    name: definition.name.clone(),
                    source,
                },
            )?;

            by_engine
                .entry(EngineType::new(&definition.engine))
                .or_default()
                .push(JobTypeMatcher {
                    job_type: JobType::new(definition.name.trim()),
                    property: definition.property.clone(),
                    pattern,
                });
        }

        Ok(Self { by_engine })
    }

    /// Number of job types defined for `engine`.
    pub fn count_for(&self, engine: &EngineType) -> usize {
        self.by_engine.get(engine).map_or(0, Vec::len)
    }

    /// True when no job types are defined for any engine.
    pub fn is_empty(&self) -> bool {
        self.by_engine.is_empty()
    }
}

impl<D> JobTypeClassifier<D> for ConfiguredJobTypes
where
    D: JobConfiguration + ?Sized,
{
    fn classify(&self, data: &D) -> Option<JobType> {
        self.by_engine
            .get(data.engine_type())?
            .iter()
            .find(|matcher| matcher.matches(data))
            .map(|matcher| matcher.job_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::JobData;

    struct Props {
        engine: EngineType,
        props: HashMap<String, String>,
    }

    impl Props {
        fn new(engine: &str, pairs: &[(&str, &str)]) -> Self {
            Self {
                engine: EngineType::new(engine),
                props: pairs
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            }
        }
    }

    impl JobData for Props {
        fn is_empty(&self) -> bool {
            false
        }
    }

    impl JobConfiguration for Props {
        fn engine_type(&self) -> &EngineType {
            &self.engine
        }

        fn property(&self, key: &str) -> Option<&str> {
            self.props.get(key).map(String::as_str)
        }
    }

    fn definition(name: &str, engine: &str, property: &str, pattern: &str) -> JobTypeConfig {
        JobTypeConfig {
            name: name.to_string(),
            engine: engine.to_string(),
            property: property.to_string(),
            pattern: pattern.to_string(),
        }
    }

    fn classifier() -> ConfiguredJobTypes {
        ConfiguredJobTypes::from_config(&[
            definition("Pig", "mapreduce", "pig.script", ".*"),
            definition("Hive", "mapreduce", "hive.mapred.mode", ".*"),
            definition("Cascading", "mapreduce", "cascading.app.frameworks", ".*cascading.*"),
            definition("HadoopJava", "mapreduce", "mapred.child.java.opts", ".*"),
            definition("Spark", "spark", "spark.app.id", ".*"),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_matching_definition_wins() {
        let data = Props::new(
            "mapreduce",
            &[("hive.mapred.mode", "strict"), ("mapred.child.java.opts", "-Xmx1g")],
        );
        assert_eq!(classifier().classify(&data), Some(JobType::new("Hive")));
    }

    #[test]
    fn test_pattern_must_match_whole_value() {
        let data = Props::new("mapreduce", &[("cascading.app.frameworks", "scalding")]);
        assert_eq!(classifier().classify(&data), None);

        let data = Props::new(
            "mapreduce",
            &[("cascading.app.frameworks", "scalding,cascading:2.5")],
        );
        assert_eq!(classifier().classify(&data), Some(JobType::new("Cascading")));
    }

    #[test]
    fn test_definitions_scoped_to_engine() {
        let data = Props::new("spark", &[("pig.script", "x.pig")]);
        assert_eq!(classifier().classify(&data), None);

        let data = Props::new("tez", &[("pig.script", "x.pig")]);
        assert_eq!(classifier().classify(&data), None);
    }

    #[test]
    fn test_counts_per_engine() {
        let classifier = classifier();
        assert_eq!(classifier.count_for(&EngineType::new("MAPREDUCE")), 4);
        assert_eq!(classifier.count_for(&EngineType::new("spark")), 1);
        assert_eq!(classifier.count_for(&EngineType::new("tez")), 0);
        assert!(!classifier.is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = ConfiguredJobTypes::from_config(&[definition("Bad", "spark", "p", "(")])
            .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidPattern { ref name, .. } if name == "Bad"));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let err = ConfiguredJobTypes::from_config(&[definition("Pig", "", "p", ".*")]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::EmptyField {
                index: 0,
                field: "engine"
            }
        ));
    }
}
