//! [`Condition`] resolution and the three condition variants.
//!
//! [`Condition::new`] is the single gate through which every condition
//! passes. It runs once per condition, when the problem is assembled,
//! and checks (in this order, so error messages are reproducible):
//!
//! 1. `data_weight` is extracted (default `1.0`).
//! 2. No positional arguments were supplied.
//! 3. The remaining keyword set equals exactly one variant's key-set.
//! 4. `input_points`, `output_points`, `location` and `data_weight`
//!    carry the right kind of value.
//! 5. `function` normalizes to a non-empty sequence of callables.
//! 6. `data_weight` satisfies the configured [`WeightPolicy`](crate::WeightPolicy).
//!
//! Consumers (training loops, samplers, loss aggregation) never
//! re-validate a [`Condition`]; holding one is the proof.

use indexmap::IndexMap;
use std::fmt;
use tracing::debug;
use veld_core::{
    Capability, ConditionError, ConditionKey, ConditionValue, Functions, KeySet, LocationRef,
    ResidualRef, TensorRef, ValueKind,
};

use crate::args::ConditionArgs;
use crate::config::ValidationConfig;

/// Weight applied when `data_weight` is not supplied.
pub const DEFAULT_DATA_WEIGHT: f64 = 1.0;

// ── Variants ───────────────────────────────────────────────────────

/// Tag naming which of the three condition shapes a [`Condition`] has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionVariant {
    /// Paired input/output data points.
    Supervised,
    /// Residuals evaluated on samples drawn from a location.
    LocationDriven,
    /// Residuals evaluated directly at given input points.
    InputDriven,
}

impl ConditionVariant {
    /// Every variant, in resolution order.
    pub const ALL: [ConditionVariant; 3] =
        [Self::Supervised, Self::LocationDriven, Self::InputDriven];

    /// The exact keyword set that selects this variant.
    pub fn keys(self) -> KeySet {
        let keys: &[ConditionKey] = match self {
            Self::Supervised => &[ConditionKey::InputPoints, ConditionKey::OutputPoints],
            Self::LocationDriven => &[ConditionKey::Location, ConditionKey::Function],
            Self::InputDriven => &[ConditionKey::InputPoints, ConditionKey::Function],
        };
        keys.iter().copied().collect()
    }

    /// The variant whose key-set equals `keys`, if any.
    pub fn resolve(keys: &KeySet) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.keys() == *keys)
    }

    /// Short name for logs and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Supervised => "supervised",
            Self::LocationDriven => "location-driven",
            Self::InputDriven => "input-driven",
        }
    }
}

impl fmt::Display for ConditionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The validated fields of a condition. Each variant carries exactly
/// its own fields.
#[derive(Clone)]
pub enum ConditionKind {
    /// The model is trained to map `input_points` to `output_points`.
    Supervised {
        /// Input data points.
        input_points: TensorRef,
        /// Target data points.
        output_points: TensorRef,
    },
    /// The model is trained to minimize `functions` on samples of
    /// `location`.
    LocationDriven {
        /// Domain the sampler draws from.
        location: LocationRef,
        /// Residuals, in the order supplied. Never empty.
        functions: Functions,
    },
    /// The model is trained to minimize `functions` at `input_points`.
    InputDriven {
        /// Evaluation points.
        input_points: TensorRef,
        /// Residuals, in the order supplied. Never empty.
        functions: Functions,
    },
}

impl ConditionKind {
    /// The tag for this payload.
    pub fn variant(&self) -> ConditionVariant {
        match self {
            Self::Supervised { .. } => ConditionVariant::Supervised,
            Self::LocationDriven { .. } => ConditionVariant::LocationDriven,
            Self::InputDriven { .. } => ConditionVariant::InputDriven,
        }
    }
}

// ── Condition ──────────────────────────────────────────────────────

/// A validated, immutable condition specification.
///
/// Cloning is cheap and shares the underlying tensors, locations and
/// residuals with the original.
#[derive(Clone)]
pub struct Condition {
    kind: ConditionKind,
    data_weight: f64,
}

impl Condition {
    /// Validate keyword arguments with the default [`ValidationConfig`].
    pub fn new(args: ConditionArgs) -> Result<Self, ConditionError> {
        Self::with_config(args, &ValidationConfig::default())
    }

    /// Validate keyword arguments.
    pub fn with_config(
        args: ConditionArgs,
        config: &ValidationConfig,
    ) -> Result<Self, ConditionError> {
        let result = resolve(args, config);
        match &result {
            Ok(condition) => debug!(
                variant = %condition.variant(),
                data_weight = condition.data_weight,
                functions = condition.functions().map_or(0, |f| f.len()),
                "condition resolved"
            ),
            Err(e) => debug!(error = %e, "condition rejected"),
        }
        result
    }

    /// A supervised condition.
    pub fn supervised(input_points: TensorRef, output_points: TensorRef) -> Self {
        Self {
            kind: ConditionKind::Supervised {
                input_points,
                output_points,
            },
            data_weight: DEFAULT_DATA_WEIGHT,
        }
    }

    /// A location-driven condition. Fails if `functions` is empty.
    pub fn location_driven(
        location: LocationRef,
        functions: impl IntoIterator<Item = ResidualRef>,
    ) -> Result<Self, ConditionError> {
        Ok(Self {
            kind: ConditionKind::LocationDriven {
                location,
                functions: non_empty(functions.into_iter().collect())?,
            },
            data_weight: DEFAULT_DATA_WEIGHT,
        })
    }

    /// An input-driven condition. Fails if `functions` is empty.
    pub fn input_driven(
        input_points: TensorRef,
        functions: impl IntoIterator<Item = ResidualRef>,
    ) -> Result<Self, ConditionError> {
        Ok(Self {
            kind: ConditionKind::InputDriven {
                input_points,
                functions: non_empty(functions.into_iter().collect())?,
            },
            data_weight: DEFAULT_DATA_WEIGHT,
        })
    }

    /// Replace the loss weight. Stored verbatim.
    pub fn with_data_weight(mut self, data_weight: f64) -> Self {
        self.data_weight = data_weight;
        self
    }

    /// The validated payload.
    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    /// Which variant this condition resolved to.
    pub fn variant(&self) -> ConditionVariant {
        self.kind.variant()
    }

    /// The keyword set this condition was built from (without
    /// `data_weight`).
    pub fn keys(&self) -> KeySet {
        self.variant().keys()
    }

    /// Loss-contribution weight.
    pub fn data_weight(&self) -> f64 {
        self.data_weight
    }

    /// Input points, for supervised and input-driven conditions.
    pub fn input_points(&self) -> Option<&TensorRef> {
        match &self.kind {
            ConditionKind::Supervised { input_points, .. }
            | ConditionKind::InputDriven { input_points, .. } => Some(input_points),
            ConditionKind::LocationDriven { .. } => None,
        }
    }

    /// Target points, for supervised conditions.
    pub fn output_points(&self) -> Option<&TensorRef> {
        match &self.kind {
            ConditionKind::Supervised { output_points, .. } => Some(output_points),
            _ => None,
        }
    }

    /// Sampling domain, for location-driven conditions.
    pub fn location(&self) -> Option<&LocationRef> {
        match &self.kind {
            ConditionKind::LocationDriven { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Residuals, for location- and input-driven conditions.
    pub fn functions(&self) -> Option<&[ResidualRef]> {
        match &self.kind {
            ConditionKind::LocationDriven { functions, .. }
            | ConditionKind::InputDriven { functions, .. } => Some(functions.as_slice()),
            ConditionKind::Supervised { .. } => None,
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Condition");
        s.field("variant", &self.variant());
        if let Some(t) = self.input_points() {
            s.field("input_labels", &t.labels());
        }
        if let Some(t) = self.output_points() {
            s.field("output_labels", &t.labels());
        }
        if let Some(l) = self.location() {
            s.field("location_variables", &l.variables());
        }
        if let Some(fs) = self.functions() {
            let names: Vec<&str> = fs.iter().map(|r| r.name()).collect();
            s.field("functions", &names);
        }
        s.field("data_weight", &self.data_weight).finish()
    }
}

// ── Resolution ─────────────────────────────────────────────────────

fn resolve(args: ConditionArgs, config: &ValidationConfig) -> Result<Condition, ConditionError> {
    let ConditionArgs {
        mut fields,
        positional,
    } = args;

    // 1. data_weight is never part of the discriminant
    let weight = fields.shift_remove(ConditionKey::DataWeight.as_str());

    // 2. keyword-only
    if !positional.is_empty() {
        return Err(ConditionError::Arity {
            count: positional.len(),
        });
    }

    // 3. exact key-set match
    let mut keys = KeySet::empty();
    let mut unknown = Vec::new();
    for name in fields.keys() {
        match name.parse::<ConditionKey>() {
            Ok(key) => keys.insert(key),
            Err(_) => unknown.push(name.clone()),
        }
    }
    if !unknown.is_empty() || ConditionVariant::resolve(&keys).is_none() {
        return Err(ConditionError::shape(&keys, unknown));
    }

    // 4. capability checks
    let input_points = take_tensor(&mut fields, ConditionKey::InputPoints)?;
    let output_points = take_tensor(&mut fields, ConditionKey::OutputPoints)?;
    let location = take_location(&mut fields)?;
    let data_weight = match weight {
        None => DEFAULT_DATA_WEIGHT,
        Some(ConditionValue::Scalar(w)) => w,
        Some(other) => {
            return Err(type_error(
                ConditionKey::DataWeight,
                None,
                Capability::Numeric,
                &other,
            ))
        }
    };

    // 5. function normalization
    let functions = fields
        .shift_remove(ConditionKey::Function.as_str())
        .map(normalize_functions)
        .transpose()?;

    // 6. weight policy
    config.weight.check(data_weight)?;

    let kind = match (input_points, output_points, location, functions) {
        (Some(input_points), Some(output_points), None, None) => ConditionKind::Supervised {
            input_points,
            output_points,
        },
        (None, None, Some(location), Some(functions)) => ConditionKind::LocationDriven {
            location,
            functions,
        },
        (Some(input_points), None, None, Some(functions)) => ConditionKind::InputDriven {
            input_points,
            functions,
        },
        // Step 3 admitted only the three shapes above.
        _ => return Err(ConditionError::shape(&keys, Vec::new())),
    };

    Ok(Condition { kind, data_weight })
}

fn take_tensor(
    fields: &mut IndexMap<String, ConditionValue>,
    key: ConditionKey,
) -> Result<Option<TensorRef>, ConditionError> {
    match fields.shift_remove(key.as_str()) {
        None => Ok(None),
        Some(ConditionValue::Tensor(t)) => Ok(Some(t)),
        Some(other) => Err(type_error(key, None, Capability::LabeledTensor, &other)),
    }
}

fn take_location(
    fields: &mut IndexMap<String, ConditionValue>,
) -> Result<Option<LocationRef>, ConditionError> {
    match fields.shift_remove(ConditionKey::Location.as_str()) {
        None => Ok(None),
        Some(ConditionValue::Location(l)) => Ok(Some(l)),
        Some(other) => Err(type_error(
            ConditionKey::Location,
            None,
            Capability::Location,
            &other,
        )),
    }
}

/// A bare value becomes a one-element sequence; a sequence keeps its
/// order. Every element must be a callable.
fn normalize_functions(value: ConditionValue) -> Result<Functions, ConditionError> {
    let items = match value {
        ConditionValue::Sequence(items) => items,
        single => vec![single],
    };
    let functions = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            ConditionValue::Function(f) => Ok(f),
            other => Err(type_error(
                ConditionKey::Function,
                Some(i),
                Capability::Callable,
                &other,
            )),
        })
        .collect::<Result<Functions, _>>()?;
    non_empty(functions)
}

fn non_empty(functions: Functions) -> Result<Functions, ConditionError> {
    if functions.is_empty() {
        return Err(ConditionError::Type {
            field: ConditionKey::Function,
            index: None,
            expected: Capability::NonEmptySequence,
            found: ValueKind::Sequence,
        });
    }
    Ok(functions)
}

fn type_error(
    field: ConditionKey,
    index: Option<usize>,
    expected: Capability,
    found: &ConditionValue,
) -> ConditionError {
    ConditionError::Type {
        field,
        index,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPolicy;
    use std::sync::Arc;
    use veld_core::{LabeledTensor, Location, ResidualError};

    // ── Test capabilities ──────────────────────────────────────

    struct Points(Vec<String>);
    impl LabeledTensor for Points {
        fn labels(&self) -> &[String] {
            &self.0
        }
        fn rows(&self) -> usize {
            1
        }
        fn column(&self, _label: &str) -> Option<Vec<f64>> {
            None
        }
    }

    struct Square;
    impl Location for Square {
        fn variables(&self) -> Vec<String> {
            vec!["x".into(), "y".into()]
        }
    }

    fn points(labels: &[&str]) -> TensorRef {
        Arc::new(Points(labels.iter().map(|l| l.to_string()).collect()))
    }

    fn square() -> LocationRef {
        Arc::new(Square)
    }

    fn residual() -> ResidualRef {
        Arc::new(|_: &dyn LabeledTensor, _: &dyn LabeledTensor| {
            Ok::<Vec<f64>, ResidualError>(vec![0.0])
        })
    }

    // ── Variant resolution ─────────────────────────────────────

    #[test]
    fn supervised_exposes_only_its_fields() {
        let (t1, t2) = (points(&["x"]), points(&["u"]));
        let c = Condition::new(
            ConditionArgs::new()
                .input_points(t1.clone())
                .output_points(t2.clone()),
        )
        .unwrap();
        assert_eq!(c.variant(), ConditionVariant::Supervised);
        assert!(Arc::ptr_eq(c.input_points().unwrap(), &t1));
        assert!(Arc::ptr_eq(c.output_points().unwrap(), &t2));
        assert!(c.location().is_none());
        assert!(c.functions().is_none());
        assert_eq!(c.data_weight(), 1.0);
    }

    #[test]
    fn location_driven_wraps_single_function() {
        let f = residual();
        let c = Condition::new(ConditionArgs::new().location(square()).function(f.clone()))
            .unwrap();
        assert_eq!(c.variant(), ConditionVariant::LocationDriven);
        let fs = c.functions().unwrap();
        assert_eq!(fs.len(), 1);
        assert!(Arc::ptr_eq(&fs[0], &f));
        assert!(c.input_points().is_none());
        assert!(c.output_points().is_none());
    }

    #[test]
    fn input_driven_keeps_function_order() {
        let (f1, f2) = (residual(), residual());
        let c = Condition::new(
            ConditionArgs::new()
                .input_points(points(&["x"]))
                .functions(vec![f1.clone(), f2.clone()]),
        )
        .unwrap();
        assert_eq!(c.variant(), ConditionVariant::InputDriven);
        let fs = c.functions().unwrap();
        assert_eq!(fs.len(), 2);
        assert!(Arc::ptr_eq(&fs[0], &f1));
        assert!(Arc::ptr_eq(&fs[1], &f2));
        assert!(c.location().is_none());
    }

    #[test]
    fn keys_match_variant() {
        for variant in ConditionVariant::ALL {
            assert_eq!(ConditionVariant::resolve(&variant.keys()), Some(variant));
        }
        assert_eq!(ConditionVariant::resolve(&KeySet::empty()), None);
    }

    // ── Rejections ─────────────────────────────────────────────

    #[test]
    fn positional_argument_is_rejected_before_shape() {
        // Invalid keyword set as well: arity is reported first.
        let err = Condition::new(ConditionArgs::new().positional(1.0).with("bogus", 1.0))
            .unwrap_err();
        assert_eq!(err, ConditionError::Arity { count: 1 });
    }

    #[test]
    fn mixed_key_set_is_rejected() {
        let err = Condition::new(
            ConditionArgs::new()
                .input_points(points(&["x"]))
                .location(square()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConditionError::Shape {
                keys: vec!["input_points".into(), "location".into()],
            }
        );
    }

    #[test]
    fn unknown_keyword_is_a_shape_error() {
        let err = Condition::new(
            ConditionArgs::new()
                .input_points(points(&["x"]))
                .output_points(points(&["u"]))
                .with("equation", residual()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConditionError::Shape {
                keys: vec![
                    "input_points".into(),
                    "output_points".into(),
                    "equation".into()
                ],
            }
        );
    }

    #[test]
    fn shape_is_checked_before_types() {
        let err = Condition::new(ConditionArgs::new().with("input_points", 3.0)).unwrap_err();
        assert!(matches!(err, ConditionError::Shape { .. }));
    }

    #[test]
    fn plain_number_as_input_points_is_a_type_error() {
        let err = Condition::new(
            ConditionArgs::new()
                .with("input_points", 3.0)
                .output_points(points(&["u"])),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConditionError::Type {
                field: ConditionKey::InputPoints,
                index: None,
                expected: Capability::LabeledTensor,
                found: ValueKind::Scalar,
            }
        );
    }

    #[test]
    fn tensor_as_location_is_a_type_error() {
        let err = Condition::new(
            ConditionArgs::new()
                .with("location", points(&["x"]))
                .function(residual()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConditionError::Type {
                field: ConditionKey::Location,
                found: ValueKind::Tensor,
                ..
            }
        ));
    }

    #[test]
    fn non_callable_element_reports_its_index() {
        let err = Condition::new(
            ConditionArgs::new().input_points(points(&["x"])).with(
                "function",
                vec![residual().into(), ConditionValue::from("laplace")],
            ),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConditionError::Type {
                field: ConditionKey::Function,
                index: Some(1),
                expected: Capability::Callable,
                found: ValueKind::Text,
            }
        );
    }

    #[test]
    fn bare_non_callable_function_reports_index_zero() {
        let err = Condition::new(ConditionArgs::new().location(square()).with("function", 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ConditionError::Type {
                field: ConditionKey::Function,
                index: Some(0),
                ..
            }
        ));
    }

    #[test]
    fn empty_function_list_is_rejected() {
        let err = Condition::new(
            ConditionArgs::new()
                .location(square())
                .functions(Vec::new()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConditionError::Type {
                field: ConditionKey::Function,
                index: None,
                expected: Capability::NonEmptySequence,
                found: ValueKind::Sequence,
            }
        );
        assert!(Condition::location_driven(square(), Vec::new()).is_err());
    }

    // ── data_weight ────────────────────────────────────────────

    #[test]
    fn data_weight_is_stored_verbatim() {
        let c = Condition::new(
            ConditionArgs::new()
                .data_weight(2.5)
                .input_points(points(&["x"]))
                .output_points(points(&["u"])),
        )
        .unwrap();
        assert_eq!(c.data_weight(), 2.5);
        assert_eq!(c.keys().len(), 2);
    }

    #[test]
    fn negative_weight_passes_by_default_and_fails_when_positive_required() {
        let args = || {
            ConditionArgs::new()
                .location(square())
                .function(residual())
                .data_weight(-1.0)
        };
        assert_eq!(Condition::new(args()).unwrap().data_weight(), -1.0);

        let strict = ValidationConfig::with_weight_policy(WeightPolicy::Positive);
        let err = Condition::with_config(args(), &strict).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidWeight { value, .. } if value == -1.0));
    }

    #[test]
    fn non_numeric_weight_is_a_type_error() {
        let err = Condition::new(
            ConditionArgs::new()
                .location(square())
                .function(residual())
                .with("data_weight", "heavy"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConditionError::Type {
                field: ConditionKey::DataWeight,
                expected: Capability::Numeric,
                ..
            }
        ));
    }

    // ── Typed constructors ─────────────────────────────────────

    #[test]
    fn typed_constructors_match_keyword_resolution() {
        let t = points(&["x"]);
        let f = residual();
        let typed = Condition::input_driven(t.clone(), [f.clone()])
            .unwrap()
            .with_data_weight(0.5);
        let keyword = Condition::new(
            ConditionArgs::new()
                .input_points(t)
                .function(f)
                .data_weight(0.5),
        )
        .unwrap();
        assert_eq!(typed.variant(), keyword.variant());
        assert_eq!(typed.data_weight(), keyword.data_weight());
        assert_eq!(format!("{typed:?}"), format!("{keyword:?}"));
    }

    #[test]
    fn debug_lists_present_fields_only() {
        let c = Condition::supervised(points(&["x", "y"]), points(&["u"]));
        let dbg = format!("{c:?}");
        assert!(dbg.contains("Supervised"));
        assert!(dbg.contains("input_labels"));
        assert!(!dbg.contains("functions"));
    }
}
