//! Error types for condition construction and residual evaluation.

use crate::key::{ConditionKey, KeySet};
use crate::value::{Capability, ValueKind};
use std::error::Error;
use std::fmt;

/// Key-sets a condition may be built from, in the order they are tried.
pub(crate) const ALLOWED_SHAPES: &str =
    "{input_points, output_points}, {location, function}, {input_points, function}";

/// Errors from condition construction.
///
/// Every variant is a caller error: the specification is malformed and
/// must be fixed before the condition can be used. No partially built
/// condition is ever returned alongside one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionError {
    /// Positional arguments were supplied; only keyword fields are accepted.
    Arity {
        /// Number of positional arguments supplied.
        count: usize,
    },
    /// The supplied keyword fields match none of the condition variants.
    Shape {
        /// The offending keywords, excluding `data_weight`: recognized
        /// keys in canonical order, then unrecognized ones sorted.
        keys: Vec<String>,
    },
    /// A field's value lacks the required capability.
    Type {
        /// The field that failed.
        field: ConditionKey,
        /// Position inside a `function` sequence, when the failure is
        /// about a single element.
        index: Option<usize>,
        /// What the field requires.
        expected: Capability,
        /// What was supplied.
        found: ValueKind,
    },
    /// `data_weight` violates the configured weight policy.
    InvalidWeight {
        /// The rejected weight.
        value: f64,
        /// Human-readable description of the policy.
        requirement: &'static str,
    },
}

impl ConditionError {
    /// Build a [`Shape`](Self::Shape) error from a resolved key-set and
    /// any keywords that name no field.
    pub fn shape(keys: &KeySet, mut unknown: Vec<String>) -> Self {
        unknown.sort();
        Self::Shape {
            keys: keys
                .iter()
                .map(|k| k.as_str().to_string())
                .chain(unknown)
                .collect(),
        }
    }
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { count } => write!(
                f,
                "condition takes no positional arguments, got {count}; \
                 only keyword-style fields are accepted: \
                 {{input_points, output_points, location, function, data_weight}}"
            ),
            Self::Shape { keys } => write!(
                f,
                "invalid condition fields {{{}}}; expected one of {ALLOWED_SHAPES}",
                keys.join(", ")
            ),
            Self::Type {
                field,
                index,
                expected,
                found,
            } => {
                match index {
                    Some(i) => write!(f, "`{field}[{i}]`")?,
                    None => write!(f, "`{field}`")?,
                }
                write!(f, " must be {expected}, got {found}")
            }
            Self::InvalidWeight { value, requirement } => {
                write!(f, "`data_weight` must be {requirement}, got {value}")
            }
        }
    }
}

impl Error for ConditionError {}

/// Errors from evaluating a residual.
///
/// Returned by [`Residual::evaluate`](crate::Residual::evaluate); never
/// produced by validation, which does not call residuals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResidualError {
    /// The residual failed for a reason of its own.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A tensor did not carry a label the residual needs.
    MissingLabel {
        /// The missing label.
        label: String,
    },
}

impl fmt::Display for ResidualError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::MissingLabel { label } => write!(f, "missing label '{label}'"),
        }
    }
}

impl Error for ResidualError {}
