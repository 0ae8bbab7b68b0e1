//! Linear system assembly
//!
//! # Mathematical Background
//!
//! Writing the approximate solution as u ≈ f + Σ_i x_i·ω_i with
//!
//! ```text
//! ω_i(t) = ∫_left^right K(t, x)·B_i(x) dx
//! ```
//!
//! and applying the functionals λ_j to u = f + ∫K·u gives
//!
//! ```text
//! (I − M)·x = μ,   M[j, i] = λ_j(ω_i),   μ[j] = λ_j(f)
//! ```
//!
//! over basis indices −2..=N−1. ω_i is the single "kernel-weighted basis
//! integral" of the crate: [`LinearSystemAssembler::kernel_weighted_integral`]
//! serves both the matrix and the Sloan correction.
//!
//! # Cost
//!
//! Every entry of M is one functional evaluation on ω_i, i.e. up to six
//! quadratures. Entries are independent; with the `parallel` feature they
//! are computed by Rayon once (N+2)² exceeds
//! [`parallel_threshold()`](crate::approximation::parallel_threshold).

use std::time::Instant;

use nalgebra::DMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::approximation::{
    BasisFamily, Grid, ProjectionFunctional, Quadrature, ShiftedMatrix, ShiftedVector,
    grid::FIRST_BASIS,
};
use crate::equation::IntegralEquation;

/// (I − M) and μ
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// I − M
    pub matrix: ShiftedMatrix,
    /// μ
    pub rhs: ShiftedVector,
}

// =================================================================================================
// Assembler
// =================================================================================================

/// Builds I, M, I − M and μ for one equation, grid and rule
///
/// Borrows everything; holds no state of its own.
#[derive(Clone, Copy)]
pub struct LinearSystemAssembler<'a> {
    equation: &'a dyn IntegralEquation,
    grid: &'a Grid,
    basis: &'a dyn BasisFamily,
    functional: &'a dyn ProjectionFunctional,
    quadrature: &'a dyn Quadrature,
}

impl<'a> LinearSystemAssembler<'a> {
    pub fn new(
        equation: &'a dyn IntegralEquation,
        grid: &'a Grid,
        basis: &'a dyn BasisFamily,
        functional: &'a dyn ProjectionFunctional,
        quadrature: &'a dyn Quadrature,
    ) -> Self {
        Self { equation, grid, basis, functional, quadrature }
    }

    /// ω_col(t) = ∫ K(t, x)·B_col(x) dx over [left, right]
    pub fn kernel_weighted_integral(&self, col: i64, t: f64) -> f64 {
        let integrand = |x: f64| self.equation.kernel(t, x) * self.basis.value(col, self.grid, x);
        self.quadrature.integrate(&integrand, self.grid.left(), self.grid.right())
    }

    /// Identity over the basis index domain
    pub fn identity(&self) -> ShiftedMatrix {
        ShiftedMatrix::identity(FIRST_BASIS, self.grid.last_basis())
    }

    /// M[row, col] = λ_row(ω_col)
    pub fn operator_entry(&self, row: i64, col: i64) -> f64 {
        self.functional.evaluate(row, &|t| self.kernel_weighted_integral(col, t))
    }

    /// Full operator matrix M
    pub fn operator_matrix(&self) -> ShiftedMatrix {
        let last = self.grid.last_basis();
        let size = self.grid.basis_count();

        if size * size > super::parallel_threshold() {
            #[cfg(feature = "parallel")]
            {
                // Row-major: k = slot_row · size + slot_col
                let values: Vec<f64> = (0..size * size)
                    .into_par_iter()
                    .map(|k| {
                        let row = FIRST_BASIS + (k / size) as i64;
                        let col = FIRST_BASIS + (k % size) as i64;
                        self.operator_entry(row, col)
                    })
                    .collect();
                return ShiftedMatrix::from_storage(
                    FIRST_BASIS,
                    DMatrix::from_row_slice(size, size, &values),
                );
            }
        }

        ShiftedMatrix::from_fn(FIRST_BASIS, last, |row, col| self.operator_entry(row, col))
    }

    /// I − M, entrywise
    pub fn difference(&self, identity: &ShiftedMatrix, operator: &ShiftedMatrix) -> ShiftedMatrix {
        identity - operator
    }

    /// μ[row] = λ_row(f)
    pub fn rhs(&self) -> ShiftedVector {
        let source = |s: f64| self.equation.source(s);
        ShiftedVector::from_fn(FIRST_BASIS, self.grid.last_basis(), |row| {
            self.functional.evaluate(row, &source)
        })
    }

    /// Assemble (I − M, μ)
    pub fn assemble(&self) -> LinearSystem {
        let start = Instant::now();

        let identity = self.identity();
        let operator = self.operator_matrix();
        let matrix = self.difference(&identity, &operator);
        let rhs = self.rhs();

        log::debug!(
            "Assembled {}x{} system ({} / {}) in {:?}",
            matrix.size(),
            matrix.size(),
            self.basis.name(),
            self.functional.name(),
            start.elapsed()
        );

        LinearSystem { matrix, rhs }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approximation::{AuxiliaryGrid, CompositeQuadrature, ProjectionRule, ThresholdGuard};
    use crate::models::{DegenerateKernel, SeparableSine};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    struct Fixture {
        grid: Grid,
        components: crate::approximation::RuleComponents,
        quadrature: CompositeQuadrature,
    }

    fn fixture(n: usize, rule: ProjectionRule) -> Fixture {
        let grid = Grid::uniform(0.0, FRAC_PI_2, n, 1e-3).unwrap();
        let aux = AuxiliaryGrid::build(&grid);
        let components = rule.build(&grid, &aux).unwrap();
        Fixture { grid, components, quadrature: CompositeQuadrature::default() }
    }

    impl Fixture {
        fn assembler<'a>(&'a self, equation: &'a dyn IntegralEquation) -> LinearSystemAssembler<'a> {
            LinearSystemAssembler::new(
                equation,
                &self.grid,
                self.components.basis.as_ref(),
                self.components.functional.as_ref(),
                &self.quadrature,
            )
        }
    }

    #[test]
    fn test_difference_is_identity_minus_operator() {
        let fixture = fixture(5, ProjectionRule::Averaging);
        let equation = SeparableSine::reference();
        let assembler = fixture.assembler(&equation);

        let identity = assembler.identity();
        let operator = assembler.operator_matrix();
        let system = assembler.assemble();

        for row in -2..=4 {
            for col in -2..=4 {
                let expected = if row == col { 1.0 } else { 0.0 } - operator[(row, col)];
                assert_eq!(system.matrix[(row, col)], expected);
                assert_eq!(identity[(row, col)], if row == col { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn test_separable_kernel_integral() {
        // ω_i(t) = sin(t)·∫ cos(x)·B_i(x) dx, so ω_i(t)/sin(t) does not depend on t
        let fixture = fixture(6, ProjectionRule::Averaging);
        let equation = SeparableSine::reference();
        let assembler = fixture.assembler(&equation);
        for col in -2..=5 {
            let a = assembler.kernel_weighted_integral(col, 0.4) / 0.4_f64.sin();
            let b = assembler.kernel_weighted_integral(col, 1.1) / 1.1_f64.sin();
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_kernel_integrals_sum_to_kernel_moment() {
        // Σ_i B_i = 1 on [left, right): Σ_i ω_i(t) = ∫ K(t, x) dx = sin(t)·1
        let fixture = fixture(8, ProjectionRule::Projection);
        let equation = SeparableSine::reference();
        let assembler = fixture.assembler(&equation);
        let t = 0.9;
        let total: f64 = (-2..=7).map(|col| assembler.kernel_weighted_integral(col, t)).sum();
        assert_relative_eq!(total, t.sin(), epsilon = 1e-5);
    }

    #[test]
    fn test_zero_kernel_gives_identity() {
        let equation = DegenerateKernel::new(|s| s * s);
        let fixture = fixture(4, ProjectionRule::SchoenbergMarsden);
        let system = fixture.assembler(&equation).assemble();

        assert_eq!(system.matrix, ShiftedMatrix::identity(-2, 3));
        for row in -2..=3 {
            let x = fixture.components.functional.stencil(row).terms()[0].0;
            assert_eq!(system.rhs[row], x * x);
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let fixture = fixture(5, ProjectionRule::DeBoorFix1);
        let equation = SeparableSine::reference();
        let assembler = fixture.assembler(&equation);

        let sequential = {
            let _guard = ThresholdGuard::save(usize::MAX);
            assembler.operator_matrix()
        };
        let parallel = {
            let _guard = ThresholdGuard::save(1);
            assembler.operator_matrix()
        };

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let fixture = fixture(4, ProjectionRule::AveragingTrigonometric);
        let equation = SeparableSine::reference();
        let assembler = fixture.assembler(&equation);
        assert_eq!(assembler.assemble(), assembler.assemble());
    }
}
