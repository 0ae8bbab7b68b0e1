//! Exact projection functionals
//!
//! Stencils sample f at knots and cell midpoints:
//!
//! ```text
//! j = −2          f(g_0)
//! j = N−1         f(g_N)
//! j = −1          K1·f(g_0)     + K2·f(m_0)     + K3·f(g_1)
//! j = N−2         K1·f(g_{N−1}) + K2·f(m_{N−1}) + K3·f(g_N)
//! otherwise       K1·f(g_j) + K2·f(m_j) + K3·f(m_{j+1}) + K2·f(m_{j+2}) + K1·f(g_{j+3})
//! ```
//!
//! where m_i is the midpoint of [g_i, g_{i+1}].
//!
//! # Weights
//!
//! The weights come from the values of basis function 0 of the active family
//! at five reference points,
//!
//! ```text
//! A = B_0(g_1)   B = B_0(m_0)   C = B_0(m_1)   D = B_0(g_2)   E = B_0(m_2)
//! ```
//!
//! ```text
//! boundary:  K = −1 / (ACD − A²E − BD²)        K1 = AEK   K2 = −ADK   K3 = BDK
//! interior:  K =  1 / (C²D − ACE − BDE − DE²)  K1 = E²K   K2 = −DEK   K3 = (CD − AE)K
//! ```
//!
//! For the algebraic family on a uniform grid this gives the classical
//! {−½, 2, −½} and {1/14, −2/7, 10/7, −2/7, 1/14}, which
//! [`ProjectionWeights::ALGEBRAIC`] stores exactly.

use super::{ProjectionFunctional, Stencil, StencilTable, checked_reciprocal};
use crate::approximation::{BasisFamily, Grid, grid::FIRST_BASIS};
use crate::error::{FredholmError, Result};

/// Smallest N for which the weights can be derived (B_0 needs g_3 in [left, right])
///
/// The fixed algebraic weights have no minimum: for N < 3 only the end and
/// boundary stencils occur.
pub const MIN_DERIVED_GRID_POINTS: usize = 3;

// =================================================================================================
// Weights
// =================================================================================================

/// Stencil weights (K1, K2, K3) at the boundary and in the interior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionWeights {
    pub boundary: [f64; 3],
    pub interior: [f64; 3],
}

impl ProjectionWeights {
    /// Exact weights of the algebraic family
    pub const ALGEBRAIC: ProjectionWeights = ProjectionWeights {
        boundary: [-0.5, 2.0, -0.5],
        interior: [1.0 / 14.0, -2.0 / 7.0, 10.0 / 7.0],
    };

    /// Derive the weights from basis function 0 of `family` on `grid`
    ///
    /// # Errors
    ///
    /// - `Configuration` when N < 3
    /// - `NumericalInstability` when one of the two denominators vanishes or
    ///   the basis values are not finite
    pub fn derive(family: &dyn BasisFamily, grid: &Grid) -> Result<Self> {
        if grid.grid_points() < MIN_DERIVED_GRID_POINTS {
            return Err(FredholmError::configuration(format!(
                "Derived projection weights need at least {} grid points, got {}",
                MIN_DERIVED_GRID_POINTS,
                grid.grid_points()
            )));
        }

        let b0 = |x: f64| family.value(0, grid, x);
        let a = b0(grid[1]);
        let b = b0(grid.midpoint(0));
        let c = b0(grid.midpoint(1));
        let d = b0(grid[2]);
        let e = b0(grid.midpoint(2));

        let boundary_terms = [a * c * d, a * a * e, b * d * d];
        let k = -checked_reciprocal(
            "projection weights (boundary)",
            -1,
            boundary_terms[0] - boundary_terms[1] - boundary_terms[2],
            boundary_terms.iter().map(|t| t.abs()).sum(),
        )?;
        let boundary = [a * e * k, -a * d * k, b * d * k];

        let interior_terms = [c * c * d, a * c * e, b * d * e, d * e * e];
        let k = checked_reciprocal(
            "projection weights (interior)",
            0,
            interior_terms[0] - interior_terms[1] - interior_terms[2] - interior_terms[3],
            interior_terms.iter().map(|t| t.abs()).sum(),
        )?;
        let interior = [e * e * k, -d * e * k, (c * d - a * e) * k];

        Ok(Self { boundary, interior })
    }
}

// =================================================================================================
// Functional
// =================================================================================================

/// Exact projection with fixed or family-derived weights
#[derive(Debug, Clone)]
pub struct ExactProjection {
    name: &'static str,
    weights: ProjectionWeights,
    stencils: StencilTable,
}

impl ExactProjection {
    /// Fixed algebraic weights, defined for every N ≥ 1
    pub fn algebraic(grid: &Grid) -> Self {
        Self::with_weights("Exact projection", ProjectionWeights::ALGEBRAIC, grid)
    }

    /// Weights derived from the basis function of `family`
    pub fn derived(name: &'static str, family: &dyn BasisFamily, grid: &Grid) -> Result<Self> {
        let weights = ProjectionWeights::derive(family, grid)?;
        Ok(Self::with_weights(name, weights, grid))
    }

    /// Weights in use
    pub fn weights(&self) -> ProjectionWeights {
        self.weights
    }

    fn with_weights(name: &'static str, weights: ProjectionWeights, grid: &Grid) -> Self {
        let n = grid.grid_points() as i64;
        let last = grid.last_basis();
        let [b1, b2, b3] = weights.boundary;
        let [k1, k2, k3] = weights.interior;

        let stencils = StencilTable::from_fn(FIRST_BASIS, last, |j| {
            if j == FIRST_BASIS {
                Stencil::point(grid[0])
            } else if j == last {
                Stencil::point(grid[n])
            } else if j == -1 {
                Stencil::new(vec![(grid[0], b1), (grid.midpoint(0), b2), (grid[1], b3)])
            } else if j == n - 2 {
                Stencil::new(vec![(grid[n - 1], b1), (grid.midpoint(n - 1), b2), (grid[n], b3)])
            } else {
                Stencil::new(vec![
                    (grid[j], k1),
                    (grid.midpoint(j), k2),
                    (grid.midpoint(j + 1), k3),
                    (grid.midpoint(j + 2), k2),
                    (grid[j + 3], k1),
                ])
            }
        });

        Self { name, weights, stencils }
    }
}

impl ProjectionFunctional for ExactProjection {
    fn name(&self) -> &'static str {
        self.name
    }

    fn stencil(&self, j: i64) -> &Stencil {
        self.stencils.get(j)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approximation::basis::{Algebraic, Hyperbolic, Trigonometric};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_derived_algebraic_weights_match_constants() {
        let grid = Grid::uniform(0.0, 1.0, 10, 1e-3).unwrap();
        let derived = ProjectionWeights::derive(&Algebraic, &grid).unwrap();
        let fixed = ProjectionWeights::ALGEBRAIC;

        for (d, f) in derived.boundary.iter().zip(fixed.boundary) {
            assert_relative_eq!(*d, f, epsilon = 1e-12);
        }
        for (d, f) in derived.interior.iter().zip(fixed.interior) {
            assert_relative_eq!(*d, f, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let grid = Grid::uniform(0.0, FRAC_PI_2, 15, 1e-3).unwrap();
        for family in [&Algebraic as &dyn BasisFamily, &Trigonometric, &Hyperbolic] {
            let w = ProjectionWeights::derive(family, &grid).unwrap();
            assert_relative_eq!(w.boundary.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            let [k1, k2, k3] = w.interior;
            assert_relative_eq!(2.0 * k1 + 2.0 * k2 + k3, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_derived_weights_approach_algebraic_on_fine_grids() {
        let grid = Grid::uniform(0.0, 0.1, 20, 1e-4).unwrap();
        let fixed = ProjectionWeights::ALGEBRAIC;
        for family in [&Trigonometric as &dyn BasisFamily, &Hyperbolic] {
            let w = ProjectionWeights::derive(family, &grid).unwrap();
            for (d, f) in w.interior.iter().zip(fixed.interior) {
                assert_relative_eq!(*d, f, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_stencil_topology() {
        let grid = Grid::uniform(0.0, 1.0, 6, 1e-3).unwrap();
        let projection = ExactProjection::algebraic(&grid);

        assert_eq!(projection.stencil(-2).terms(), &[(0.0, 1.0)]);
        assert_eq!(projection.stencil(5).terms(), &[(grid[6], 1.0)]);
        assert_eq!(projection.stencil(-1).terms().len(), 3);
        assert_eq!(projection.stencil(4).terms().len(), 3);
        for j in 0..=3 {
            let terms = projection.stencil(j).terms();
            assert_eq!(terms.len(), 5);
            assert_eq!(terms[0].0, grid[j]);
            assert_eq!(terms[4].0, grid[j + 3]);
        }
    }

    #[test]
    fn test_exact_on_quadratics_at_inner_indices() {
        // Quadratic B-spline dual: λ_j(x²) = g[j+1]·g[j+2]
        let grid = Grid::uniform(0.0, 1.0, 9, 1e-3).unwrap();
        let projection = ExactProjection::algebraic(&grid);
        for j in -1..=7 {
            assert_relative_eq!(
                projection.evaluate(j, &|x| x * x),
                grid[j + 1] * grid[j + 2],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_fixed_weights_on_one_and_two_cells() {
        // No interior stencil: every functional is an end or boundary stencil
        for n in [1, 2] {
            let grid = Grid::uniform(0.0, 1.0, n, 1e-3).unwrap();
            let projection = ExactProjection::algebraic(&grid);
            let last = grid.last_basis();

            assert_eq!(projection.stencil(-2).terms(), &[(grid[0], 1.0)]);
            assert_eq!(projection.stencil(last).terms(), &[(grid[n as i64], 1.0)]);
            for j in -1..last {
                assert_eq!(projection.stencil(j).terms().len(), 3);
                assert_relative_eq!(
                    projection.evaluate(j, &|x| x * x),
                    grid[j + 1] * grid[j + 2],
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_derived_weights_need_three_cells() {
        let grid = Grid::uniform(0.0, 1.0, 2, 1e-3).unwrap();
        assert!(ProjectionWeights::derive(&Trigonometric, &grid).unwrap_err().is_configuration());
        assert!(
            ExactProjection::derived("Hyperbolic projection", &Hyperbolic, &grid)
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_overflowing_basis_values_are_unstable() {
        // sinh and cosh of 1000 overflow, so B_0 evaluates to NaN
        let grid = Grid::uniform(0.0, 6000.0, 3, 1e-3).unwrap();
        let err = ExactProjection::derived("Hyperbolic projection", &Hyperbolic, &grid).unwrap_err();
        assert!(err.is_instability());
    }
}
