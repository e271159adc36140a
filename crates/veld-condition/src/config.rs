//! Validation configuration.

use veld_core::ConditionError;

/// How strictly `data_weight` is checked.
///
/// The weight is a loss multiplier owned by the caller; by default any
/// number is stored verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Store any number, including NaN, zero and negatives.
    #[default]
    Unchecked,
    /// Reject NaN and infinities.
    Finite,
    /// Reject anything that is not finite and strictly positive.
    Positive,
}

impl WeightPolicy {
    /// Check a weight against this policy.
    pub fn check(self, value: f64) -> Result<(), ConditionError> {
        let requirement = match self {
            Self::Unchecked => return Ok(()),
            Self::Finite if value.is_finite() => return Ok(()),
            Self::Positive if value.is_finite() && value > 0.0 => return Ok(()),
            Self::Finite => "finite",
            Self::Positive => "finite and positive",
        };
        Err(ConditionError::InvalidWeight { value, requirement })
    }
}

/// Options applied by [`Condition::with_config`](crate::Condition::with_config).
///
/// The default configuration implements the plain validation rules and
/// nothing else.
#[derive(Clone, Debug, Default)]
pub struct ValidationConfig {
    /// Policy for `data_weight`. Default: [`WeightPolicy::Unchecked`].
    pub weight: WeightPolicy,
}

impl ValidationConfig {
    /// Configuration with a given weight policy.
    pub fn with_weight_policy(weight: WeightPolicy) -> Self {
        Self { weight }
    }
}
