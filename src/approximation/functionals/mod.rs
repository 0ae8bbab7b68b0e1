//! Projection functionals
//!
//! A projection functional λ_j maps a continuous function f to one scalar per
//! basis index j. Every rule in this crate is a finite linear combination of
//! point values of f:
//!
//! ```text
//! λ_j(f) = Σ_k w_k · f(x_k)
//! ```
//!
//! Derivative-corrected rules fit the same shape because their derivatives
//! are central differences. A rule is therefore fully described by one
//! [`Stencil`] per basis index, computed once when the functional is built.
//! Building is where everything that can go wrong goes wrong (near-zero
//! denominators in derived weights); evaluating a stencil is infallible.
//!
//! # Module Organization
//!
//! - [`pointwise`]: Schoenberg–Marsden, f at the auxiliary node
//! - [`averaging`]: 3-point averaging, fixed (algebraic) or derived
//!   (trigonometric/hyperbolic) weights
//! - [`de_boor`]: de Boor–Fix dual functionals at the three knots
//! - [`projection`]: exact projection, fixed or derived 5-point stencils
//!
//! # Small solves
//!
//! [`solve_2x2`] is the Cramer helper behind derived averaging weights.
//! [`first_derivative`] and [`second_derivative`] return the central
//! difference stencils with step [`DERIVATIVE_STEP`].

use std::fmt;

use crate::error::{FredholmError, Result};

pub mod averaging;
pub mod de_boor;
pub mod pointwise;
pub mod projection;

pub use averaging::Averaging;
pub use de_boor::{DeBoorFix, DeBoorNode};
pub use pointwise::SchoenbergMarsden;
pub use projection::{ExactProjection, ProjectionWeights};

/// Step of the central differences
pub const DERIVATIVE_STEP: f64 = 1e-5;

/// Relative size below which a derived denominator counts as zero
pub(crate) const WEIGHT_TOLERANCE: f64 = 1e-12;

// =================================================================================================
// Projection Functional Trait
// =================================================================================================

/// One functional per basis index, evaluated on arbitrary functions
///
/// # Contract
///
/// - `stencil(j)` is defined for every basis index −2..=N−1 of the grid the
///   functional was built on, and panics outside that range
/// - `evaluate` is linear in `f` and deterministic
pub trait ProjectionFunctional: Send + Sync + fmt::Debug {
    /// Name of the rule (used to display and logging)
    fn name(&self) -> &'static str;

    /// Stencil of functional `j`
    fn stencil(&self, j: i64) -> &Stencil;

    /// λ_j(f)
    fn evaluate(&self, j: i64, f: &dyn Fn(f64) -> f64) -> f64 {
        self.stencil(j).apply(f)
    }
}

// =================================================================================================
// Stencil
// =================================================================================================

/// Linear combination of point values: Σ weight·f(point)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stencil {
    terms: Vec<(f64, f64)>,
}

impl Stencil {
    /// Stencil from `(point, weight)` pairs
    pub fn new(terms: Vec<(f64, f64)>) -> Self {
        Self { terms }
    }

    /// f(x)
    pub fn point(x: f64) -> Self {
        Self { terms: vec![(x, 1.0)] }
    }

    /// `(point, weight)` pairs in evaluation order
    pub fn terms(&self) -> &[(f64, f64)] {
        &self.terms
    }

    /// Weights in evaluation order
    pub fn weights(&self) -> Vec<f64> {
        self.terms.iter().map(|&(_, w)| w).collect()
    }

    /// Σ weights, i.e. the value on f ≡ 1
    pub fn weight_sum(&self) -> f64 {
        self.terms.iter().map(|&(_, w)| w).sum()
    }

    /// Multiply every weight by `factor`
    pub fn scaled(mut self, factor: f64) -> Self {
        for term in &mut self.terms {
            term.1 *= factor;
        }
        self
    }

    /// Concatenate with another stencil (sum of functionals)
    pub fn plus(mut self, other: Stencil) -> Self {
        self.terms.extend(other.terms);
        self
    }

    /// Σ weight·f(point)
    pub fn apply(&self, f: &dyn Fn(f64) -> f64) -> f64 {
        self.terms.iter().map(|&(x, w)| w * f(x)).sum()
    }
}

// =================================================================================================
// Stencil Table
// =================================================================================================

/// Stencils indexed by basis index `first..`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StencilTable {
    first: i64,
    stencils: Vec<Stencil>,
}

impl StencilTable {
    /// Build stencils for `first..=last`, stopping at the first failure
    pub(crate) fn try_from_fn<F>(first: i64, last: i64, mut build: F) -> Result<Self>
    where
        F: FnMut(i64) -> Result<Stencil>,
    {
        let stencils = (first..=last).map(&mut build).collect::<Result<Vec<_>>>()?;
        Ok(Self { first, stencils })
    }

    /// Infallible variant of [`StencilTable::try_from_fn`]
    pub(crate) fn from_fn<F>(first: i64, last: i64, mut build: F) -> Self
    where
        F: FnMut(i64) -> Stencil,
    {
        Self {
            first,
            stencils: (first..=last).map(&mut build).collect(),
        }
    }

    pub(crate) fn get(&self, j: i64) -> &Stencil {
        let last = self.first + self.stencils.len() as i64 - 1;
        if j < self.first || j > last {
            panic!("index {} outside populated range {}..={}", j, self.first, last);
        }
        &self.stencils[(j - self.first) as usize]
    }
}

// =================================================================================================
// Helpers
// =================================================================================================

/// Central difference f'(x) ≈ (f(x+h) − f(x−h)) / 2h
pub fn first_derivative(x: f64) -> Stencil {
    let h = DERIVATIVE_STEP;
    Stencil::new(vec![(x + h, 0.5 / h), (x - h, -0.5 / h)])
}

/// Central difference of the central difference
///
/// f''(x) ≈ (f(x+2h) − 2f(x) + f(x−2h)) / 4h²
pub fn second_derivative(x: f64) -> Stencil {
    let h = DERIVATIVE_STEP;
    let scale = 0.25 / (h * h);
    Stencil::new(vec![(x + 2.0 * h, scale), (x, -2.0 * scale), (x - 2.0 * h, scale)])
}

/// Solve the 2×2 system `matrix · x = rhs` by Cramer's rule
///
/// Returns `None` when the determinant is not finite or vanishes relative to
/// the products it is formed from (cancellation leaves no significant digit).
pub fn solve_2x2(matrix: [[f64; 2]; 2], rhs: [f64; 2]) -> Option<[f64; 2]> {
    let [[a, b], [c, d]] = matrix;
    let det = determinant_2x2(matrix);
    let scale = (a * d).abs() + (b * c).abs();

    if !det.is_finite() || det.abs() <= WEIGHT_TOLERANCE * scale {
        return None;
    }

    let x0 = (rhs[0] * d - b * rhs[1]) / det;
    let x1 = (a * rhs[1] - rhs[0] * c) / det;
    Some([x0, x1])
}

/// Determinant of a 2×2 matrix
pub fn determinant_2x2(matrix: [[f64; 2]; 2]) -> f64 {
    matrix[0][0] * matrix[1][1] - matrix[0][1] * matrix[1][0]
}

/// 1 / denominator, or an instability error when the denominator vanishes
/// relative to `scale`
pub(crate) fn checked_reciprocal(
    stage: &'static str,
    index: i64,
    denominator: f64,
    scale: f64,
) -> Result<f64> {
    if !denominator.is_finite() || denominator.abs() <= WEIGHT_TOLERANCE * scale.abs() {
        return Err(FredholmError::instability(stage, index, denominator));
    }
    Ok(1.0 / denominator)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stencil_apply() {
        let stencil = Stencil::new(vec![(1.0, 2.0), (2.0, -1.0)]);
        assert_eq!(stencil.apply(&|x| x * x), 2.0 - 4.0);
        assert_eq!(stencil.weight_sum(), 1.0);
        assert_eq!(stencil.weights(), vec![2.0, -1.0]);
    }

    #[test]
    fn test_stencil_combinators() {
        let stencil = Stencil::point(0.5).plus(Stencil::point(1.5).scaled(3.0));
        assert_eq!(stencil.terms(), &[(0.5, 1.0), (1.5, 3.0)]);
        assert_eq!(stencil.apply(&|x| x), 0.5 + 4.5);
    }

    #[test]
    fn test_first_derivative_on_quadratic() {
        // Central differences are exact on quadratics up to rounding
        let d = first_derivative(0.7).apply(&|x| 3.0 * x * x - x + 2.0);
        assert_relative_eq!(d, 6.0 * 0.7 - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_second_derivative_on_quadratic() {
        let d2 = second_derivative(0.3).apply(&|x| 3.0 * x * x - x + 2.0);
        assert_relative_eq!(d2, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_solve_2x2() {
        // 2x + y = 5, x - y = 1 → x = 2, y = 1
        let [x, y] = solve_2x2([[2.0, 1.0], [1.0, -1.0]], [5.0, 1.0]).unwrap();
        assert_relative_eq!(x, 2.0, epsilon = 1e-15);
        assert_relative_eq!(y, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_solve_2x2_singular() {
        assert!(solve_2x2([[1.0, 2.0], [2.0, 4.0]], [1.0, 2.0]).is_none());
        assert!(solve_2x2([[0.0, 0.0], [0.0, 0.0]], [1.0, 2.0]).is_none());
        assert!(solve_2x2([[f64::NAN, 0.0], [0.0, 1.0]], [1.0, 2.0]).is_none());
    }

    #[test]
    fn test_checked_reciprocal() {
        assert_eq!(checked_reciprocal("test", 0, 4.0, 1.0).unwrap(), 0.25);
        let err = checked_reciprocal("test", 3, 1e-20, 1.0).unwrap_err();
        assert!(err.is_instability());
    }

    #[test]
    fn test_stencil_table() {
        let table = StencilTable::from_fn(-2, 1, |j| Stencil::point(j as f64));
        assert_eq!(table.get(-2).terms(), &[(-2.0, 1.0)]);
        assert_eq!(table.get(1).terms(), &[(1.0, 1.0)]);
    }

    #[test]
    #[should_panic(expected = "outside populated range")]
    fn test_stencil_table_out_of_range() {
        let table = StencilTable::from_fn(-2, 1, |j| Stencil::point(j as f64));
        let _ = table.get(2);
    }

    #[test]
    fn test_stencil_table_propagates_error() {
        let result = StencilTable::try_from_fn(-2, 3, |j| {
            if j == 1 {
                Err(FredholmError::instability("test", j, 0.0))
            } else {
                Ok(Stencil::point(0.0))
            }
        });
        assert!(result.unwrap_err().is_instability());
    }
}
