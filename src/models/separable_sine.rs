//! Separable sine kernel
//!
//! # Equation
//!
//! ```text
//! u(s) = sin(s) + ∫ₐᵇ sin(s)·cos(t)·u(t) dt
//! ```
//!
//! The kernel has rank one, so the solution is a multiple of the source:
//! u(s) = c·sin(s) with c = 1 + c·∫ₐᵇ cos(t)·sin(t) dt. On the reference
//! interval [0, π/2] the integral is ½, hence c = 2 and u(s) = 2·sin(s).
//!
//! The factor depends on the interval, so the model is built for one:
//! [`SeparableSine::reference`] or [`SeparableSine::on`].

use std::f64::consts::FRAC_PI_2;

use crate::equation::IntegralEquation;

/// K(s,t) = sin(s)·cos(t), f(s) = sin(s), u(s) = c·sin(s) on [left, right]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparableSine {
    left: f64,
    right: f64,
    /// c, or `None` when the equation has no unique solution
    factor: Option<f64>,
}

impl SeparableSine {
    /// The reference equation on [0, π/2], u(s) = 2·sin(s)
    pub fn reference() -> Self {
        Self::on(0.0, FRAC_PI_2)
    }

    /// The equation integrated over [left, right]
    ///
    /// The interval must match the one of the [`ProblemConfiguration`](crate::equation::ProblemConfiguration)
    /// it is solved on, otherwise the reported exact solution belongs to
    /// another equation.
    pub fn on(left: f64, right: f64) -> Self {
        Self { left, right, factor: Self::exact_factor(left, right) }
    }

    /// Interval the exact solution refers to
    pub fn interval(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    /// Factor c of the exact solution u(s) = c·sin(s) on [left, right]
    ///
    /// c = 1 / (1 − ∫ cos(t)·sin(t) dt) with ∫ cos·sin = (sin²(right) − sin²(left)) / 2.
    /// Returns `None` when the integral equals one (the equation is not
    /// uniquely solvable).
    pub fn exact_factor(left: f64, right: f64) -> Option<f64> {
        let moment = 0.5 * (right.sin().powi(2) - left.sin().powi(2));
        let denominator = 1.0 - moment;
        if denominator.abs() < 1e-14 {
            None
        } else {
            Some(1.0 / denominator)
        }
    }
}

impl Default for SeparableSine {
    fn default() -> Self {
        Self::reference()
    }
}

impl IntegralEquation for SeparableSine {
    fn kernel(&self, s: f64, t: f64) -> f64 {
        s.sin() * t.cos()
    }

    fn source(&self, s: f64) -> f64 {
        s.sin()
    }

    fn exact_solution(&self, s: f64) -> Option<f64> {
        self.factor.map(|c| c * s.sin())
    }

    fn name(&self) -> &str {
        "Separable Sine"
    }

    fn description(&self) -> Option<&str> {
        Some("K(s,t) = sin(s)cos(t), f(s) = sin(s), exact u(s) = c sin(s) with c = 2 on [0, pi/2]")
    }
}
