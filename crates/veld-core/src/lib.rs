//! Core types and traits for Veld condition specifications.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the capability traits a condition consumes ([`LabeledTensor`],
//! [`Location`], [`Residual`]), the dynamic keyword value used to
//! describe a condition before validation ([`ConditionValue`]), the
//! field keys and the [`KeySet`] bitset, and the error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod key;
pub mod traits;
pub mod value;

pub use error::{ConditionError, ResidualError};
pub use key::{ConditionKey, KeySet, KeySetIter, UnknownKey};
pub use traits::{
    Functions, LabeledTensor, Location, LocationRef, Residual, ResidualRef, TensorRef,
};
pub use value::{Capability, ConditionValue, ValueKind};
