use thiserror::Error;

/// Errors raised while evaluating a mass or mass-ratio density
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MassModelError {
    /// A scalar model parameter violates its precondition
    #[error("Invalid parameter: {param} = {value} ({reason})")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Paired inputs of different lengths
    #[error("Length mismatch: {left} has {left_len} points but {right} has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// The quadrature integral of the unnormalized shape vanished or was not finite
    #[error("Degenerate normalization in {model}: integral = {value}")]
    DegenerateNormalization { model: &'static str, value: f64 },
}

impl MassModelError {
    pub(crate) fn invalid(param: &'static str, value: f64, reason: &'static str) -> Self {
        MassModelError::InvalidParameter {
            param,
            value,
            reason,
        }
    }
}
