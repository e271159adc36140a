//! [`ConditionArgs`]: the keyword-style description of a condition.

use indexmap::IndexMap;
use veld_core::{ConditionKey, ConditionValue, LocationRef, ResidualRef, TensorRef};

/// Unvalidated keyword fields (and any stray positional arguments)
/// describing one condition.
///
/// Keys are free-form strings so that misspelled or unsupported fields
/// reach validation and are reported, rather than being unrepresentable.
/// Setting the same key twice keeps the last value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use veld_condition::{Condition, ConditionArgs};
/// use veld_test_utils::{MockSpan, ZeroResidual};
///
/// let args = ConditionArgs::new()
///     .location(Arc::new(MockSpan::new([("x", 0.0, 1.0)])))
///     .function(Arc::new(ZeroResidual::new("u")));
/// let condition = Condition::new(args).unwrap();
/// assert_eq!(condition.functions().map(|f| f.len()), Some(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConditionArgs {
    pub(crate) fields: IndexMap<String, ConditionValue>,
    pub(crate) positional: Vec<ConditionValue>,
}

impl ConditionArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary keyword field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Record a positional argument. Conditions accept none, so any
    /// positional argument makes validation fail.
    pub fn positional(mut self, value: impl Into<ConditionValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set `input_points`.
    pub fn input_points(self, points: TensorRef) -> Self {
        self.with(ConditionKey::InputPoints.as_str(), points)
    }

    /// Set `output_points`.
    pub fn output_points(self, points: TensorRef) -> Self {
        self.with(ConditionKey::OutputPoints.as_str(), points)
    }

    /// Set `location`.
    pub fn location(self, location: LocationRef) -> Self {
        self.with(ConditionKey::Location.as_str(), location)
    }

    /// Set `function` to a single residual.
    pub fn function(self, function: ResidualRef) -> Self {
        self.with(ConditionKey::Function.as_str(), function)
    }

    /// Set `function` to an ordered list of residuals.
    pub fn functions(self, functions: Vec<ResidualRef>) -> Self {
        self.with(ConditionKey::Function.as_str(), functions)
    }

    /// Set `data_weight`.
    pub fn data_weight(self, weight: f64) -> Self {
        self.with(ConditionKey::DataWeight.as_str(), weight)
    }

    /// Keyword names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Look up a keyword value.
    pub fn get(&self, key: &str) -> Option<&ConditionValue> {
        self.fields.get(key)
    }

    /// Number of keyword fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no keyword fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of positional arguments recorded.
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_order_is_kept() {
        let args = ConditionArgs::new()
            .with("location", 1.0)
            .with("function", "f")
            .with("location", 2.0);
        assert_eq!(args.len(), 2);
        assert_eq!(args.keys().collect::<Vec<_>>(), ["location", "function"]);
        assert_eq!(args.get("location").and_then(|v| v.as_scalar()), Some(2.0));
    }

    #[test]
    fn data_weight_is_an_ordinary_keyword() {
        let args = ConditionArgs::new().data_weight(0.5);
        assert_eq!(args.get("data_weight").and_then(|v| v.as_scalar()), Some(0.5));
        assert_eq!(args.positional_len(), 0);
    }
}
