//! Minimal spline basis families
//!
//! # Mathematical Background
//!
//! Basis function `j` lives on the three cells `[g_j, g_{j+3})` of the primary
//! grid. All three families share the same piecewise structure and differ
//! only in the pair of functions `(s, c)` applied to knot differences:
//!
//! | Family        | s(δ)       | c(δ)       |
//! |---------------|------------|------------|
//! | Algebraic     | δ          | 1          |
//! | Trigonometric | sin(δ/2)   | cos(δ/2)   |
//! | Hyperbolic    | sinh(δ/2)  | cosh(δ/2)  |
//!
//! With `κ = c(g_{j+2} − g_{j+1})`:
//!
//! ```text
//! [g_j, g_{j+1}):     κ · s(x−g_j)² / (s(g_{j+1}−g_j) · s(g_{j+2}−g_j))
//!
//! [g_{j+1}, g_{j+2}): κ / s(g_{j+1}−g_j) · ( s(x−g_j)² / s(g_{j+2}−g_j)
//!                       − s(x−g_{j+1})² · s(g_{j+3}−g_j) / (s(g_{j+3}−g_{j+1}) · s(g_{j+2}−g_{j+1})) )
//!
//! [g_{j+2}, g_{j+3}): κ · s(g_{j+3}−x)² / (s(g_{j+3}−g_{j+1}) · s(g_{j+3}−g_{j+2}))
//! ```
//!
//! and zero elsewhere. The algebraic family is the quadratic B-spline on the
//! knots `g_j..g_{j+3}`. Continuity at the inner knots follows from
//! Ptolemy's identity `s(a−c)s(b−d) = s(a−b)s(c−d) + s(b−c)s(a−d)`, which
//! holds for all three choices of `s`.
//!
//! # Precondition
//!
//! Every `s(...)` in a denominator must be non-zero: strictly increasing
//! knots, and for the trigonometric family a support shorter than 2π.
//! [`BasisFamily::validate`] checks it once per grid.

use std::fmt;

use crate::approximation::Grid;
use crate::error::{FredholmError, Result};

/// |s(δ)| at or below this fraction of |δ| counts as zero
const DEGENERACY_TOLERANCE: f64 = 1e-12;

// =================================================================================================
// Basis Family Trait
// =================================================================================================

/// A family of minimal splines
///
/// Implementors provide the pair `(s, c)`; the piecewise formula is shared.
pub trait BasisFamily: Send + Sync + fmt::Debug {
    /// Name of the family (used to display and logging)
    fn name(&self) -> &'static str;

    /// s(δ), the "difference" of the family
    fn sine_like(&self, delta: f64) -> f64;

    /// c(δ), the companion of `s` in the normalising factor
    fn cosine_like(&self, delta: f64) -> f64;

    /// Check that the formulas are well defined on `grid`
    fn validate(&self, grid: &Grid) -> Result<()> {
        for j in grid.basis_indices() {
            let widths = [
                grid[j + 1] - grid[j],
                grid[j + 2] - grid[j],
                grid[j + 3] - grid[j],
            ];
            for width in widths {
                let s = self.sine_like(width);
                if !s.is_finite() || s.abs() <= DEGENERACY_TOLERANCE * width.abs() {
                    return Err(FredholmError::configuration(format!(
                        "{} basis {} is degenerate: s({}) = {}",
                        self.name(),
                        j,
                        width,
                        s
                    )));
                }
            }
        }
        Ok(())
    }

    /// Value of basis function `j` at `x`
    fn value(&self, j: i64, grid: &Grid, x: f64) -> f64 {
        let (g0, g1, g2, g3) = (grid[j], grid[j + 1], grid[j + 2], grid[j + 3]);
        let s = |delta: f64| self.sine_like(delta);
        let kappa = self.cosine_like(g2 - g1);

        if x >= g0 && x < g1 {
            let sx = s(x - g0);
            kappa * sx * sx / (s(g1 - g0) * s(g2 - g0))
        } else if x >= g1 && x < g2 {
            let left = s(x - g0);
            let right = s(x - g1);
            let first = left * left / s(g2 - g0);
            let second = right * right * s(g3 - g0) / (s(g3 - g1) * s(g2 - g1));
            kappa / s(g1 - g0) * (first - second)
        } else if x >= g2 && x < g3 {
            let sx = s(g3 - x);
            kappa * sx * sx / (s(g3 - g1) * s(g3 - g2))
        } else {
            0.0
        }
    }

    /// Support `[g_j, g_{j+3})` of basis function `j`
    fn support(&self, j: i64, grid: &Grid) -> (f64, f64) {
        (grid[j], grid[j + 3])
    }
}

// =================================================================================================
// Families
// =================================================================================================

/// Quadratic B-splines
#[derive(Debug, Clone, Copy, Default)]
pub struct Algebraic;

impl BasisFamily for Algebraic {
    fn name(&self) -> &'static str {
        "Algebraic"
    }

    fn sine_like(&self, delta: f64) -> f64 {
        delta
    }

    fn cosine_like(&self, _delta: f64) -> f64 {
        1.0
    }
}

/// Trigonometric minimal splines, span {1, sin, cos} locally
#[derive(Debug, Clone, Copy, Default)]
pub struct Trigonometric;

impl BasisFamily for Trigonometric {
    fn name(&self) -> &'static str {
        "Trigonometric"
    }

    fn sine_like(&self, delta: f64) -> f64 {
        (0.5 * delta).sin()
    }

    fn cosine_like(&self, delta: f64) -> f64 {
        (0.5 * delta).cos()
    }
}

/// Hyperbolic minimal splines, span {1, sinh, cosh} locally
#[derive(Debug, Clone, Copy, Default)]
pub struct Hyperbolic;

impl BasisFamily for Hyperbolic {
    fn name(&self) -> &'static str {
        "Hyperbolic"
    }

    fn sine_like(&self, delta: f64) -> f64 {
        (0.5 * delta).sinh()
    }

    fn cosine_like(&self, delta: f64) -> f64 {
        (0.5 * delta).cosh()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
