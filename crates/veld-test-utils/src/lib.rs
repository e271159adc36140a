//! Test utilities and mock capabilities for Veld development.
//!
//! Provides mock implementations of the capability traits
//! ([`LabeledTensor`], [`Location`]) and the residual fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{DirichletResidual, ZeroResidual};

use std::sync::Arc;

use veld_core::{LabeledTensor, Location, LocationRef, TensorRef};

/// Row-major labeled tensor backed by a `Vec<f64>`.
///
/// Build one with [`MockTensor::new`] and share it with
/// [`MockTensor::shared`] when a [`TensorRef`] is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct MockTensor {
    labels: Vec<String>,
    data: Vec<f64>,
}

impl MockTensor {
    /// Create a tensor from column labels and rows.
    ///
    /// # Panics
    ///
    /// Panics if a row's length differs from the number of labels.
    pub fn new<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<f64>>,
    ) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut data = Vec::new();
        for row in rows {
            assert_eq!(
                row.len(),
                labels.len(),
                "row has {} values for {} labels",
                row.len(),
                labels.len()
            );
            data.extend(row);
        }
        Self { labels, data }
    }

    /// Wrap in an `Arc` as a [`TensorRef`].
    pub fn shared(self) -> TensorRef {
        Arc::new(self)
    }
}

impl LabeledTensor for MockTensor {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn rows(&self) -> usize {
        if self.labels.is_empty() {
            0
        } else {
            self.data.len() / self.labels.len()
        }
    }

    fn column(&self, label: &str) -> Option<Vec<f64>> {
        let col = self.labels.iter().position(|l| l == label)?;
        Some(
            self.data
                .iter()
                .skip(col)
                .step_by(self.labels.len())
                .copied()
                .collect(),
        )
    }
}

/// Axis-aligned box: one `(variable, lower, upper)` interval per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct MockSpan {
    bounds: Vec<(String, f64, f64)>,
}

impl MockSpan {
    /// Create a span from per-variable bounds.
    pub fn new<S: Into<String>>(bounds: impl IntoIterator<Item = (S, f64, f64)>) -> Self {
        Self {
            bounds: bounds
                .into_iter()
                .map(|(name, lo, hi)| (name.into(), lo, hi))
                .collect(),
        }
    }

    /// Bounds of one variable.
    pub fn bounds(&self, variable: &str) -> Option<(f64, f64)> {
        self.bounds
            .iter()
            .find(|(name, _, _)| name == variable)
            .map(|&(_, lo, hi)| (lo, hi))
    }

    /// Wrap in an `Arc` as a [`LocationRef`].
    pub fn shared(self) -> LocationRef {
        Arc::new(self)
    }
}

impl Location for MockSpan {
    fn variables(&self) -> Vec<String> {
        self.bounds.iter().map(|(name, _, _)| name.clone()).collect()
    }
}
