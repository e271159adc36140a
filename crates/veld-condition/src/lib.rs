//! Validated condition specifications for Veld problems.
//!
//! A condition is one constraint a learned model must satisfy: paired
//! data, residuals on a sampled domain, or residuals at given points.
//! [`Condition::new`] resolves an unvalidated [`ConditionArgs`] into one
//! of the three [`ConditionKind`] variants or rejects it with a
//! [`ConditionError`](veld_core::ConditionError). [`ConditionSet`] owns
//! the named conditions of a problem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod args;
pub mod condition;
pub mod config;
pub mod registry;

pub use args::ConditionArgs;
pub use condition::{Condition, ConditionKind, ConditionVariant, DEFAULT_DATA_WEIGHT};
pub use config::{ValidationConfig, WeightPolicy};
pub use registry::{ConditionSet, RegistryError};
