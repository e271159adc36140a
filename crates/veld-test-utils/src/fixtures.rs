//! Reusable residual fixtures.
//!
//! Two standard residuals for condition and registry testing:
//!
//! - [`ZeroResidual`]: the output column itself (`u = 0`).
//! - [`DirichletResidual`]: `u - value` on one output column.

use std::sync::Arc;

use veld_core::{LabeledTensor, Residual, ResidualError, ResidualRef};

fn output_column(output: &dyn LabeledTensor, label: &str) -> Result<Vec<f64>, ResidualError> {
    output
        .column(label)
        .ok_or_else(|| ResidualError::MissingLabel {
            label: label.to_string(),
        })
}

/// Returns the `label` column of the output unchanged.
pub struct ZeroResidual {
    pub label: String,
}

impl ZeroResidual {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn shared(label: impl Into<String>) -> ResidualRef {
        Arc::new(Self::new(label))
    }
}

impl Residual for ZeroResidual {
    fn name(&self) -> &str {
        "zero"
    }

    fn evaluate(
        &self,
        _input: &dyn LabeledTensor,
        output: &dyn LabeledTensor,
    ) -> Result<Vec<f64>, ResidualError> {
        output_column(output, &self.label)
    }
}

/// Fixed-value boundary residual: `output[label] - value`.
pub struct DirichletResidual {
    pub label: String,
    pub value: f64,
}

impl DirichletResidual {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn shared(label: impl Into<String>, value: f64) -> ResidualRef {
        Arc::new(Self::new(label, value))
    }
}

impl Residual for DirichletResidual {
    fn name(&self) -> &str {
        "dirichlet"
    }

    fn evaluate(
        &self,
        _input: &dyn LabeledTensor,
        output: &dyn LabeledTensor,
    ) -> Result<Vec<f64>, ResidualError> {
        let mut col = output_column(output, &self.label)?;
        for v in &mut col {
            *v -= self.value;
        }
        Ok(col)
    }
}
