//! [`ConditionSet`]: the named collection of validated conditions a
//! problem is trained against.

use indexmap::IndexMap;
use std::error::Error;
use std::fmt;
use tracing::debug;
use veld_core::ConditionError;

use crate::args::ConditionArgs;
use crate::condition::{Condition, ConditionVariant};
use crate::config::ValidationConfig;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from assembling a [`ConditionSet`].
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    /// A condition was registered under an empty name.
    EmptyName,
    /// Two conditions share a name.
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// A condition failed validation.
    Condition {
        /// Name the condition was registered under.
        name: String,
        /// The underlying validation failure.
        source: ConditionError,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "condition name must not be empty"),
            Self::DuplicateName { name } => {
                write!(f, "condition '{name}' is already registered")
            }
            Self::Condition { name, source } => write!(f, "condition '{name}': {source}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Condition { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── ConditionSet ───────────────────────────────────────────────────

/// Named conditions in registration order.
///
/// Owns its conditions for the lifetime of the problem. There is no
/// removal or mutation: once a condition is in the set, training code
/// can rely on it staying exactly as validated.
#[derive(Clone, Debug, Default)]
pub struct ConditionSet {
    conditions: IndexMap<String, Condition>,
    config: ValidationConfig,
}

impl ConditionSet {
    /// Create an empty set that validates with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set that validates keyword arguments with `config`.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            conditions: IndexMap::new(),
            config,
        }
    }

    /// Build a set from `(name, args)` pairs, stopping at the first
    /// failure.
    pub fn from_args<I, S>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, ConditionArgs)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, args) in entries {
            set.insert_args(name, args)?;
        }
        Ok(set)
    }

    /// Register an already-validated condition.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        condition: Condition,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        self.check_name(&name)?;
        self.config
            .weight
            .check(condition.data_weight())
            .map_err(|source| RegistryError::Condition {
                name: name.clone(),
                source,
            })?;
        debug!(
            name = %name,
            variant = %condition.variant(),
            "condition registered"
        );
        self.conditions.insert(name, condition);
        Ok(())
    }

    /// Validate keyword arguments with this set's configuration and
    /// register the result.
    pub fn insert_args(
        &mut self,
        name: impl Into<String>,
        args: ConditionArgs,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        self.check_name(&name)?;
        let condition = Condition::with_config(args, &self.config).map_err(|source| {
            RegistryError::Condition {
                name: name.clone(),
                source,
            }
        })?;
        self.insert(name, condition)
    }

    fn check_name(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.conditions.contains_key(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Look up a condition by name.
    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.conditions.get(name)
    }

    /// Whether a condition is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Number of registered conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether no conditions are registered.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Condition names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// `(name, condition)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Conditions of one variant, in registration order.
    pub fn by_variant(
        &self,
        variant: ConditionVariant,
    ) -> impl Iterator<Item = (&str, &Condition)> {
        self.iter().filter(move |(_, c)| c.variant() == variant)
    }

    /// Sum of all condition weights.
    pub fn total_data_weight(&self) -> f64 {
        self.conditions.values().map(Condition::data_weight).sum()
    }

    /// The configuration keyword arguments are validated with.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPolicy;
    use std::sync::Arc;
    use veld_core::{LabeledTensor, Location, LocationRef, ResidualError, ResidualRef, TensorRef};

    struct Grid;
    impl LabeledTensor for Grid {
        fn labels(&self) -> &[String] {
            &[]
        }
        fn rows(&self) -> usize {
            0
        }
        fn column(&self, _label: &str) -> Option<Vec<f64>> {
            None
        }
    }

    struct Boundary;
    impl Location for Boundary {
        fn variables(&self) -> Vec<String> {
            vec!["x".into()]
        }
    }

    fn grid() -> TensorRef {
        Arc::new(Grid)
    }

    fn boundary() -> LocationRef {
        Arc::new(Boundary)
    }

    fn residual() -> ResidualRef {
        Arc::new(|_: &dyn LabeledTensor, _: &dyn LabeledTensor| {
            Ok::<Vec<f64>, ResidualError>(Vec::new())
        })
    }

    fn data_args() -> ConditionArgs {
        ConditionArgs::new().input_points(grid()).output_points(grid())
    }

    fn boundary_args() -> ConditionArgs {
        ConditionArgs::new().location(boundary()).function(residual())
    }

    #[test]
    fn keeps_registration_order() {
        let set = ConditionSet::from_args([
            ("gamma1", boundary_args()),
            ("data", data_args()),
            ("gamma2", boundary_args().data_weight(10.0)),
        ])
        .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["gamma1", "data", "gamma2"]);
        assert_eq!(set.total_data_weight(), 12.0);
        let boundaries: Vec<&str> = set
            .by_variant(ConditionVariant::LocationDriven)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(boundaries, ["gamma1", "gamma2"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut set = ConditionSet::new();
        set.insert_args("data", data_args()).unwrap();
        let err = set.insert_args("data", data_args()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "data".into()
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut set = ConditionSet::new();
        assert_eq!(
            set.insert("", Condition::supervised(grid(), grid())),
            Err(RegistryError::EmptyName)
        );
        assert!(set.is_empty());
    }

    #[test]
    fn validation_failure_carries_condition_name() {
        let err = ConditionSet::from_args([(
            "bad",
            ConditionArgs::new().input_points(grid()).location(boundary()),
        )])
        .unwrap_err();
        match &err {
            RegistryError::Condition { name, source } => {
                assert_eq!(name, "bad");
                assert!(matches!(source, ConditionError::Shape { .. }));
            }
            other => panic!("expected Condition error, got {other:?}"),
        }
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("condition 'bad': invalid condition fields"));
    }

    #[test]
    fn configured_policy_applies_to_typed_inserts() {
        let mut set =
            ConditionSet::with_config(ValidationConfig::with_weight_policy(WeightPolicy::Finite));
        let heavy = Condition::supervised(grid(), grid()).with_data_weight(f64::INFINITY);
        assert!(matches!(
            set.insert("heavy", heavy),
            Err(RegistryError::Condition {
                source: ConditionError::InvalidWeight { .. },
                ..
            })
        ));
        assert!(set.get("heavy").is_none());
        set.insert_args("data", data_args()).unwrap();
        assert!(set.contains("data"));
    }
}
