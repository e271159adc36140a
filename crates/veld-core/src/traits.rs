//! Capability traits consumed by condition validation.
//!
//! Conditions never depend on a concrete tensor or geometry library.
//! They hold shared handles to whatever implements these traits and
//! only check that a supplied value provides the right capability.

use crate::error::ResidualError;
use smallvec::SmallVec;
use std::any::Any;
use std::sync::Arc;

/// A multi-dimensional numeric array whose columns carry symbolic names.
///
/// Used for `input_points` and `output_points`. Validation only checks
/// that a value *is* a labeled tensor; shape and labels are inspected by
/// downstream consumers (loss aggregation, residual evaluation).
///
/// # Thread Safety
///
/// `Sync` is required so that validated conditions can be shared across
/// training workers behind an `Arc`.
pub trait LabeledTensor: Any + Send + Sync + 'static {
    /// Column labels, in column order.
    fn labels(&self) -> &[String];

    /// Number of points (rows).
    fn rows(&self) -> usize;

    /// Copy out the column carrying `label`.
    ///
    /// Returns `None` if no column has that label.
    fn column(&self, label: &str) -> Option<Vec<f64>>;

    /// Whether a column carries `label`.
    fn has_label(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }
}

impl dyn LabeledTensor {
    /// Attempt to downcast a trait object to a concrete tensor type.
    pub fn downcast_ref<T: LabeledTensor>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// A geometric or sampling region over which function conditions are
/// evaluated.
///
/// Sampling is owned by the domain library; a condition only stores the
/// handle.
pub trait Location: Any + Send + Sync + 'static {
    /// Names of the input variables spanned by this region.
    fn variables(&self) -> Vec<String>;

    /// Number of spatial dimensions.
    fn ndim(&self) -> usize {
        self.variables().len()
    }
}

impl dyn Location {
    /// Attempt to downcast a trait object to a concrete location type.
    pub fn downcast_ref<T: Location>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// A residual function: how far `output` is from satisfying a condition
/// at `input`.
///
/// Implemented for every closure of the matching shape, so most callers
/// never implement it by hand:
///
/// ```
/// use std::sync::Arc;
/// use veld_core::{LabeledTensor, Residual, ResidualError, ResidualRef};
///
/// let laplace: ResidualRef = Arc::new(
///     |_input: &dyn LabeledTensor, output: &dyn LabeledTensor| {
///         output
///             .column("u")
///             .ok_or_else(|| ResidualError::MissingLabel { label: "u".into() })
///     },
/// );
/// assert_eq!(laplace.name(), "residual");
/// ```
pub trait Residual: Send + Sync + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str {
        "residual"
    }

    /// Evaluate the residual, one value per input point.
    fn evaluate(
        &self,
        input: &dyn LabeledTensor,
        output: &dyn LabeledTensor,
    ) -> Result<Vec<f64>, ResidualError>;
}

impl<F> Residual for F
where
    F: Fn(&dyn LabeledTensor, &dyn LabeledTensor) -> Result<Vec<f64>, ResidualError>
        + Send
        + Sync
        + 'static,
{
    fn evaluate(
        &self,
        input: &dyn LabeledTensor,
        output: &dyn LabeledTensor,
    ) -> Result<Vec<f64>, ResidualError> {
        self(input, output)
    }
}

/// Shared handle to a labeled tensor.
pub type TensorRef = Arc<dyn LabeledTensor>;

/// Shared handle to a location.
pub type LocationRef = Arc<dyn Location>;

/// Shared handle to a residual function.
pub type ResidualRef = Arc<dyn Residual>;

/// Ordered, non-empty list of residuals attached to a condition.
///
/// Inline storage for two covers the common cases (one PDE residual, or
/// a residual plus a boundary term) without a heap allocation.
pub type Functions = SmallVec<[ResidualRef; 2]>;
