//! Three-point averaging functionals
//!
//! # Stencil
//!
//! At the two boundary indices (j = −2 and j = N−1) the functional is the
//! point value at the auxiliary node. Elsewhere:
//!
//! ```text
//! λ_j(f) = a·f(aux[j−1]) + b·f(aux[j]) + c·f(aux[j+1]),   a + b + c = 1
//! ```
//!
//! # Weights
//!
//! - **Algebraic** (Sablonnière): a = c = −1/8, b = 5/4. Exact on quadratics.
//! - **Trigonometric / hyperbolic**: chosen per index so that the functional
//!   is exact on {1, u, v} with (u, v) = (sin, cos) or (sinh, cosh). With
//!   Δ = g[j+2] − g[j+1] the targets are
//!
//!   ```text
//!   trigonometric:  S1 = (cos g[j+1] − cos g[j+2]) / sin Δ,   S2 = (sin g[j+2] − sin g[j+1]) / sin Δ
//!   hyperbolic:     S1 = (cosh g[j+2] − cosh g[j+1]) / sinh Δ, S2 = (sinh g[j+2] − sinh g[j+1]) / sinh Δ
//!   ```
//!
//!   and eliminating a = 1 − b − c leaves the 2×2 system
//!
//!   ```text
//!   [ u(aux[j])−u(aux[j−1])   u(aux[j+1])−u(aux[j−1]) ] [b]   [ S1 − u(aux[j−1]) ]
//!   [ v(aux[j])−v(aux[j−1])   v(aux[j+1])−v(aux[j−1]) ] [c] = [ S2 − v(aux[j−1]) ]
//!   ```
//!
//!   solved with [`solve_2x2`]. On fine grids the weights approach the
//!   algebraic ones.

use super::{ProjectionFunctional, Stencil, StencilTable, checked_reciprocal, determinant_2x2, solve_2x2};
use crate::approximation::{AuxiliaryGrid, Grid, grid::FIRST_BASIS};
use crate::error::{FredholmError, Result};

/// Sablonnière weights (a, b, c)
pub const SABLONNIERE_WEIGHTS: [f64; 3] = [-1.0 / 8.0, 5.0 / 4.0, -1.0 / 8.0];

/// Local harmonics of a non-polynomial family
struct Harmonics {
    u: fn(f64) -> f64,
    v: fn(f64) -> f64,
    sine_like: fn(f64) -> f64,
    /// (S1 numerator, S2 numerator) on the cell [g1, g2]
    moments: fn(f64, f64) -> (f64, f64),
}

const TRIGONOMETRIC: Harmonics = Harmonics {
    u: f64::sin,
    v: f64::cos,
    sine_like: f64::sin,
    moments: trigonometric_moments,
};

const HYPERBOLIC: Harmonics = Harmonics {
    u: f64::sinh,
    v: f64::cosh,
    sine_like: f64::sinh,
    moments: hyperbolic_moments,
};

fn trigonometric_moments(g1: f64, g2: f64) -> (f64, f64) {
    (g1.cos() - g2.cos(), g2.sin() - g1.sin())
}

fn hyperbolic_moments(g1: f64, g2: f64) -> (f64, f64) {
    (g2.cosh() - g1.cosh(), g2.sinh() - g1.sinh())
}

/// Three-point averaging functional
#[derive(Debug, Clone)]
pub struct Averaging {
    name: &'static str,
    stencils: StencilTable,
}

impl Averaging {
    /// Fixed Sablonnière weights
    pub fn algebraic(grid: &Grid, aux: &AuxiliaryGrid) -> Self {
        let last = grid.last_basis();
        let stencils = StencilTable::from_fn(FIRST_BASIS, last, |j| {
            if j == FIRST_BASIS || j == last {
                Stencil::point(aux[j])
            } else {
                three_point(aux, j, SABLONNIERE_WEIGHTS)
            }
        });

        Self { name: "Sablonniere averaging", stencils }
    }

    /// Weights exact on {1, sin, cos}
    ///
    /// # Errors
    ///
    /// `NumericalInstability` when the local 2×2 system is singular.
    pub fn trigonometric(grid: &Grid, aux: &AuxiliaryGrid) -> Result<Self> {
        Self::derived("Trigonometric averaging", &TRIGONOMETRIC, grid, aux)
    }

    /// Weights exact on {1, sinh, cosh}
    ///
    /// # Errors
    ///
    /// `NumericalInstability` when the local 2×2 system is singular.
    pub fn hyperbolic(grid: &Grid, aux: &AuxiliaryGrid) -> Result<Self> {
        Self::derived("Hyperbolic averaging", &HYPERBOLIC, grid, aux)
    }

    /// Weights (a, b, c) of an interior index, `None` at the boundary
    pub fn weights(&self, j: i64) -> Option<[f64; 3]> {
        match self.stencils.get(j).weights().as_slice() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    fn derived(
        name: &'static str,
        harmonics: &Harmonics,
        grid: &Grid,
        aux: &AuxiliaryGrid,
    ) -> Result<Self> {
        let last = grid.last_basis();
        let stencils = StencilTable::try_from_fn(FIRST_BASIS, last, |j| {
            if j == FIRST_BASIS || j == last {
                Ok(Stencil::point(aux[j]))
            } else {
                derived_weights(harmonics, grid, aux, j).map(|w| three_point(aux, j, w))
            }
        })?;

        Ok(Self { name, stencils })
    }
}

impl ProjectionFunctional for Averaging {
    fn name(&self) -> &'static str {
        self.name
    }

    fn stencil(&self, j: i64) -> &Stencil {
        self.stencils.get(j)
    }
}

fn three_point(aux: &AuxiliaryGrid, j: i64, [a, b, c]: [f64; 3]) -> Stencil {
    Stencil::new(vec![(aux[j - 1], a), (aux[j], b), (aux[j + 1], c)])
}

fn derived_weights(harmonics: &Harmonics, grid: &Grid, aux: &AuxiliaryGrid, j: i64) -> Result<[f64; 3]> {
    let (g1, g2) = (grid[j + 1], grid[j + 2]);
    let (u, v) = (harmonics.u, harmonics.v);

    let inverse = checked_reciprocal(
        "averaging weights",
        j,
        (harmonics.sine_like)(g2 - g1),
        g2 - g1,
    )?;
    let (m1, m2) = (harmonics.moments)(g1, g2);
    let (s1, s2) = (m1 * inverse, m2 * inverse);

    let (minus, centre, plus) = (aux[j - 1], aux[j], aux[j + 1]);
    let matrix = [
        [u(centre) - u(minus), u(plus) - u(minus)],
        [v(centre) - v(minus), v(plus) - v(minus)],
    ];
    let rhs = [s1 - u(minus), s2 - v(minus)];

    let [b, c] = solve_2x2(matrix, rhs)
        .ok_or_else(|| FredholmError::instability("averaging weights", j, determinant_2x2(matrix)))?;

    Ok([1.0 - b - c, b, c])
}

// =================================================================================================
// Tests
// =================================================================================================
