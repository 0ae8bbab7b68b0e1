//! Error taxonomy
//!
//! Two classes of failure can stop a computation:
//!
//! - **Configuration**: the problem cannot be discretised as requested
//!   (resolution, fictitious offset, interval, unsupported rule).
//! - **Numerical instability**: a division by a (near) zero quantity was
//!   about to happen, either a pivot of the elimination or the denominator of
//!   a derived stencil weight.
//!
//! Neither is transient. The pipeline is deterministic, so retrying with the
//! same inputs fails the same way.
//!
//! Out-of-range grid or vector indices are invariant violations and panic
//! through the `Index` implementations of [`ShiftedVector`](crate::approximation::ShiftedVector)
//! and [`ShiftedMatrix`](crate::approximation::ShiftedMatrix).

/// Errors raised by the approximation pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FredholmError {
    /// Invalid or unsupported configuration, detected before any heavy work
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Division by a near-zero quantity
    ///
    /// `stage` names the computation (e.g. "Gaussian elimination pivot"),
    /// `index` is the basis index (domain convention) where it happened.
    #[error("Numerical instability in {stage} at index {index}: value {value:e}")]
    NumericalInstability {
        stage: &'static str,
        index: i64,
        value: f64,
    },
}

impl FredholmError {
    /// Shorthand for a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        FredholmError::Configuration(message.into())
    }

    /// Shorthand for an instability error
    pub fn instability(stage: &'static str, index: i64, value: f64) -> Self {
        FredholmError::NumericalInstability { stage, index, value }
    }

    /// True for configuration errors
    pub fn is_configuration(&self) -> bool {
        matches!(self, FredholmError::Configuration(_))
    }

    /// True for numerical instability errors
    pub fn is_instability(&self) -> bool {
        matches!(self, FredholmError::NumericalInstability { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FredholmError>;
