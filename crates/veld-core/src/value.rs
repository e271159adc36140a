//! The heterogeneous keyword value used to describe a condition before
//! validation, and the capability vocabulary used to check it.

use crate::traits::{LocationRef, ResidualRef, TensorRef};
use std::fmt;

/// A keyword argument value, as supplied by the caller.
///
/// Nothing about a `ConditionValue` is trusted: validation checks that
/// each field received the kind of value its [`Capability`] demands.
/// Handles are shared (`Arc`), so cloning a value never copies tensor
/// data or closures.
#[derive(Clone)]
pub enum ConditionValue {
    /// A labeled tensor.
    Tensor(TensorRef),
    /// A location / domain.
    Location(LocationRef),
    /// A single residual callable.
    Function(ResidualRef),
    /// An ordered sequence of values (typically residuals).
    Sequence(Vec<ConditionValue>),
    /// A plain number.
    Scalar(f64),
    /// A string.
    Text(String),
}

impl ConditionValue {
    /// Runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Tensor(_) => ValueKind::Tensor,
            Self::Location(_) => ValueKind::Location,
            Self::Function(_) => ValueKind::Function,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// The number, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Debug for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tensor(t) => f
                .debug_struct("Tensor")
                .field("labels", &t.labels())
                .field("rows", &t.rows())
                .finish(),
            Self::Location(l) => f
                .debug_struct("Location")
                .field("variables", &l.variables())
                .finish(),
            Self::Function(r) => f.debug_tuple("Function").field(&r.name()).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
        }
    }
}

impl From<TensorRef> for ConditionValue {
    fn from(v: TensorRef) -> Self {
        Self::Tensor(v)
    }
}

impl From<LocationRef> for ConditionValue {
    fn from(v: LocationRef) -> Self {
        Self::Location(v)
    }
}

impl From<ResidualRef> for ConditionValue {
    fn from(v: ResidualRef) -> Self {
        Self::Function(v)
    }
}

impl From<Vec<ResidualRef>> for ConditionValue {
    fn from(v: Vec<ResidualRef>) -> Self {
        Self::Sequence(v.into_iter().map(Self::Function).collect())
    }
}

impl From<Vec<ConditionValue>> for ConditionValue {
    fn from(v: Vec<ConditionValue>) -> Self {
        Self::Sequence(v)
    }
}

impl From<f64> for ConditionValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Classification of a [`ConditionValue`], reported in type errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A labeled tensor.
    Tensor,
    /// A location / domain.
    Location,
    /// A residual callable.
    Function,
    /// A sequence of values.
    Sequence,
    /// A plain number.
    Scalar,
    /// A string.
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tensor => "labeled tensor",
            Self::Location => "location",
            Self::Function => "callable",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
            Self::Text => "string",
        };
        f.write_str(s)
    }
}

/// What a condition field is required to provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// A labeled tensor (`input_points`, `output_points`).
    LabeledTensor,
    /// A location / domain (`location`).
    Location,
    /// A residual callable (each element of `function`).
    Callable,
    /// At least one element (`function` as a whole).
    NonEmptySequence,
    /// A number (`data_weight`).
    Numeric,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LabeledTensor => "a labeled tensor",
            Self::Location => "a location",
            Self::Callable => "callable",
            Self::NonEmptySequence => "a non-empty sequence of callables",
            Self::Numeric => "numeric",
        };
        f.write_str(s)
    }
}
