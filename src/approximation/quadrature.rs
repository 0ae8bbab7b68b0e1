//! Numerical integration over a fixed interval
//!
//! The engine treats quadrature as a service with one operation,
//! `integrate(f, a, b)`. [`CompositeQuadrature`] is the default: the mean
//! of the composite trapezoid and composite Simpson rules on the same
//! uniform partition, sharing one set of samples.
//!
//! Integrands here are products of a smooth kernel with a piecewise
//! basis function, so they have kinks at the grid knots. A fixed fine
//! partition (1000 intervals by default) is deterministic and accurate
//! enough at the resolutions of interest.

use std::fmt;

use crate::error::{FredholmError, Result};

/// Default number of sub-intervals
pub const DEFAULT_INTERVALS: usize = 1000;

// =================================================================================================
// Quadrature Trait
// =================================================================================================

/// Definite integral of a scalar function
///
/// Implementations must be deterministic: the same integrand and bounds
/// always yield the same value.
pub trait Quadrature: Send + Sync + fmt::Debug {
    /// ∫_a^b f(x) dx
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> f64;

    /// Name of the rule (used to display and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Composite Trapezoid / Simpson
// =================================================================================================

/// Mean of composite trapezoid and composite Simpson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeQuadrature {
    intervals: usize,
}

impl CompositeQuadrature {
    /// Create with `intervals` sub-intervals
    ///
    /// # Errors
    ///
    /// Simpson needs an even, non-zero number of sub-intervals.
    pub fn new(intervals: usize) -> Result<Self> {
        if intervals == 0 || intervals % 2 != 0 {
            return Err(FredholmError::configuration(format!(
                "Composite quadrature needs an even positive number of intervals, got {}",
                intervals
            )));
        }
        Ok(Self { intervals })
    }

    /// Number of sub-intervals
    pub fn intervals(&self) -> usize {
        self.intervals
    }

    /// Composite trapezoid and composite Simpson, in that order
    pub fn both(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> (f64, f64) {
        let n = self.intervals;
        let h = (b - a) / n as f64;

        let ends = f(a) + f(b);
        let mut odd = 0.0;
        let mut even = 0.0;
        for i in 1..n {
            let y = f(a + i as f64 * h);
            if i % 2 == 1 {
                odd += y;
            } else {
                even += y;
            }
        }

        let trapezoid = h * (0.5 * ends + odd + even);
        let simpson = h / 3.0 * (ends + 4.0 * odd + 2.0 * even);
        (trapezoid, simpson)
    }
}

impl Default for CompositeQuadrature {
    fn default() -> Self {
        Self { intervals: DEFAULT_INTERVALS }
    }
}

impl Quadrature for CompositeQuadrature {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> f64 {
        let (trapezoid, simpson) = self.both(f, a, b);
        0.5 * (trapezoid + simpson)
    }

    fn name(&self) -> &str {
        "Composite trapezoid/Simpson mean"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
