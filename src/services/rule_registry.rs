//! Rule registry.
//!
//! The [`RuleRegistry`] maps each engine type to the ordered list of rules
//! that apply to its jobs. The list is resolved once, when the registry is
//! built, and handed out as a slice on every lookup. Registries can be
//! assembled in code or resolved from the `rules` table of the
//! configuration against a [`RuleCatalog`] of named rule instances.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::models::EngineType;
use crate::domain::ports::Rule;

/// Errors raised while resolving a configured rule table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The catalog has no rule with this class name.
    #[error("Unknown rule '{rule}' configured for engine {engine}")]
    UnknownRule {
        /// Normalized engine name
        engine: String,
        /// Configured rule name
        rule: String,
    },

    /// The same rule appears twice in one engine's list.
    #[error("Rule '{rule}' listed more than once for engine {engine}")]
    DuplicateRule {
        /// Normalized engine name
        engine: String,
        /// Repeated rule name
        rule: String,
    },

    /// Two table keys differ only in case and name the same engine.
    #[error("Rule table keys '{first}' and '{second}' both name engine {engine}")]
    ConflictingEngineKeys {
        /// Normalized engine name
        engine: String,
        /// Key seen first, in table order
        first: String,
        /// Key that collided with it
        second: String,
    },
}

/// Named rule instances available to a configured registry.
///
/// Rules are keyed by their [`class_name`](Rule::class_name).
pub struct RuleCatalog<D: ?Sized> {
    rules: HashMap<String, Arc<dyn Rule<D>>>,
}

impl<D: ?Sized> Default for RuleCatalog<D> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }
}

impl<D: ?Sized> fmt::Debug for RuleCatalog<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.names())
            .finish()
    }
}

impl<D: ?Sized> RuleCatalog<D> {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, replacing any rule with the same class name.
    pub fn add(&mut self, rule: Arc<dyn Rule<D>>) -> &mut Self {
        self.rules.insert(rule.class_name().to_string(), rule);
        self
    }

    /// Rule registered under `class_name`.
    pub fn get(&self, class_name: &str) -> Option<&Arc<dyn Rule<D>>> {
        self.rules.get(class_name)
    }

    /// Class names of all rules, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of rules in the catalog.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the catalog holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Ordered rules per engine type.
pub struct RuleRegistry<D: ?Sized> {
    rules: HashMap<EngineType, Vec<Arc<dyn Rule<D>>>>,
}

impl<D: ?Sized> Default for RuleRegistry<D> {
    /// Returns an empty registry; every engine resolves to no rules.
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }
}

impl<D: ?Sized> fmt::Debug for RuleRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let by_engine: BTreeMap<&str, Vec<&str>> = self
            .rules
            .iter()
            .map(|(engine, rules)| (engine.as_str(), rules.iter().map(|r| r.name()).collect()))
            .collect();
        f.debug_struct("RuleRegistry")
            .field("rules", &by_engine)
            .finish()
    }
}

impl<D: ?Sized> RuleRegistry<D> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to an engine's list. Registration order is evaluation order.
    pub fn register(&mut self, engine: impl Into<EngineType>, rule: Arc<dyn Rule<D>>) -> &mut Self {
        self.rules.entry(engine.into()).or_default().push(rule);
        self
    }

    /// Owned variant of [`register`](Self::register) for chained construction.
    #[must_use]
    pub fn with_rule(mut self, engine: impl Into<EngineType>, rule: Arc<dyn Rule<D>>) -> Self {
        self.register(engine, rule);
        self
    }

    /// Resolve a configured rule table against a catalog.
    ///
    /// Each entry maps an engine type name to rule class names in
    /// evaluation order. Every name must exist in the catalog and may
    /// appear at most once per engine. Engine names are case-insensitive,
    /// so keys such as `spark` and `SPARK` in one table are rejected.
    pub fn from_config(
        catalog: &RuleCatalog<D>,
        table: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        let mut keys: HashMap<EngineType, &String> = HashMap::new();
        for (engine_name, rule_names) in table {
            let engine = EngineType::new(engine_name);
            if let Some(first) = keys.insert(engine.clone(), engine_name) {
                return Err(RegistryError::ConflictingEngineKeys {
                    engine: engine.to_string(),
                    first: first.clone(),
                    second: engine_name.clone(),
                });
            }
            let mut resolved: Vec<Arc<dyn Rule<D>>> = Vec::with_capacity(rule_names.len());
            for rule_name in rule_names {
                if resolved.iter().any(|r| r.class_name() == rule_name) {
                    return Err(RegistryError::DuplicateRule {
                        engine: engine.to_string(),
                        rule: rule_name.clone(),
                    });
                }
                let rule = catalog.get(rule_name).ok_or_else(|| RegistryError::UnknownRule {
                    engine: engine.to_string(),
                    rule: rule_name.clone(),
                })?;
                resolved.push(Arc::clone(rule));
            }
            tracing::debug!(engine = %engine, rules = resolved.len(), "Resolved rules for engine");
            registry.rules.insert(engine, resolved);
        }
        Ok(registry)
    }

    /// Rules for `engine` in evaluation order; empty for an unknown engine.
    pub fn rules_for(&self, engine: &EngineType) -> &[Arc<dyn Rule<D>>] {
        self.rules.get(engine).map_or(&[], Vec::as_slice)
    }

    /// Engine types with at least one registered rule, sorted.
    pub fn engines(&self) -> Vec<&EngineType> {
        let mut engines: Vec<&EngineType> = self.rules.keys().collect();
        engines.sort_unstable();
        engines
    }
}
