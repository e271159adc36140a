//! Veld: validated condition specifications for physics-informed model
//! training.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Veld sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use veld::prelude::*;
//! use veld_test_utils::{DirichletResidual, MockSpan, MockTensor};
//!
//! let boundary = MockSpan::new([("x", 0.0, 0.0), ("y", 0.0, 1.0)]).shared();
//! let inputs = MockTensor::new(["x", "y"], [vec![0.5, 0.5]]).shared();
//! let targets = MockTensor::new(["u"], [vec![0.0]]).shared();
//!
//! let mut conditions = ConditionSet::new();
//! conditions
//!     .insert_args(
//!         "gamma1",
//!         ConditionArgs::new()
//!             .location(boundary)
//!             .function(DirichletResidual::shared("u", 0.0)),
//!     )
//!     .unwrap();
//! conditions
//!     .insert_args(
//!         "data",
//!         ConditionArgs::new()
//!             .input_points(inputs)
//!             .output_points(targets)
//!             .data_weight(10.0),
//!     )
//!     .unwrap();
//!
//! let gamma1 = conditions.get("gamma1").unwrap();
//! assert_eq!(gamma1.variant(), ConditionVariant::LocationDriven);
//! assert_eq!(gamma1.functions().unwrap().len(), 1);
//! assert_eq!(conditions.total_data_weight(), 11.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `veld-core` | Capability traits, argument values, keys, errors |
//! | [`condition`] | `veld-condition` | `Condition`, `ConditionArgs`, `ConditionSet` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Capability traits, argument values, keys and errors (`veld-core`).
pub use veld_core as types;

/// Condition validation and the condition registry (`veld-condition`).
pub use veld_condition as condition;

/// Common imports for typical Veld usage.
///
/// ```rust
/// use veld::prelude::*;
/// ```
pub mod prelude {
    // Capabilities
    pub use veld_core::{
        LabeledTensor, Location, LocationRef, Residual, ResidualRef, TensorRef,
    };

    // Arguments and errors
    pub use veld_core::{ConditionError, ConditionKey, ConditionValue, ResidualError};

    // Conditions
    pub use veld_condition::{
        Condition, ConditionArgs, ConditionKind, ConditionSet, ConditionVariant, RegistryError,
        ValidationConfig, WeightPolicy,
    };
}
