//! Dense linear solver
//!
//! # Algorithm
//!
//! Classic Gaussian elimination on a copy of the matrix:
//!
//! ```text
//! for k = 0..n-1:
//!     for i = k+1..n-1:
//!         factor = a[i,k] / a[k,k]
//!         row_i  -= factor · row_k,   b_i -= factor · b_k
//! x[i] = (b_i − Σ_{c>i} a[i,c]·x[c]) / a[i,i]     (back-substitution)
//! ```
//!
//! No pivoting is performed. A pivot with `|a[k,k]| <= 1e-12 · max|a|` is
//! reported as a [`NumericalInstability`](crate::error::FredholmError::NumericalInstability)
//! instead of letting Inf/NaN reach the coefficients.
//!
//! [`GaussianElimination::with_rescue_pivoting`] swaps rows only at such
//! pivots. On matrices that never hit one, both variants execute the same
//! floating point operations in the same order.
//!
//! The solver works in storage slots; errors report the domain index
//! (slot + first index of the matrix).

use std::fmt;
use std::time::Instant;

use crate::approximation::{ShiftedMatrix, ShiftedVector};
use crate::error::{FredholmError, Result};

/// Relative pivot tolerance
pub const PIVOT_TOLERANCE: f64 = 1e-12;

// =================================================================================================
// Linear Solver Trait
// =================================================================================================

/// Solves A·x = b over a shared shifted index domain
pub trait LinearSolver: Send + Sync + fmt::Debug {
    /// Solve `matrix · x = rhs`
    ///
    /// The solution is indexed like `rhs`.
    fn solve(&self, matrix: &ShiftedMatrix, rhs: &ShiftedVector) -> Result<ShiftedVector>;

    /// Name of the solver (used to display and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Gaussian Elimination
// =================================================================================================

/// Gaussian elimination, unpivoted unless rescue pivoting is enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianElimination {
    rescue_pivoting: bool,
}

impl GaussianElimination {
    /// Plain elimination without pivoting
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: swap rows at near-zero pivots
    pub fn with_rescue_pivoting(mut self) -> Self {
        self.rescue_pivoting = true;
        self
    }

    /// True when rescue pivoting is enabled
    pub fn rescue_pivoting(&self) -> bool {
        self.rescue_pivoting
    }

    fn is_small(pivot: f64, threshold: f64) -> bool {
        !pivot.is_finite() || pivot.abs() <= threshold
    }
}

impl LinearSolver for GaussianElimination {
    fn solve(&self, matrix: &ShiftedMatrix, rhs: &ShiftedVector) -> Result<ShiftedVector> {
        // ====== Step 1: Validation ======

        if matrix.indices() != rhs.indices() {
            return Err(FredholmError::configuration(format!(
                "Matrix over {:?} and right-hand side over {:?} do not share an index domain",
                matrix.indices(),
                rhs.indices()
            )));
        }

        let start = Instant::now();
        let first = matrix.first();
        let n = matrix.size();
        let mut a = matrix.as_dmatrix().clone();
        let mut b = rhs.as_dvector().clone();

        let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let threshold = PIVOT_TOLERANCE * scale;

        // ====== Step 2: Forward elimination ======

        for k in 0..n {
            if Self::is_small(a[(k, k)], threshold) {
                let rescue = if self.rescue_pivoting {
                    (k + 1..n)
                        .filter(|&i| !Self::is_small(a[(i, k)], threshold))
                        .max_by(|&i, &j| a[(i, k)].abs().total_cmp(&a[(j, k)].abs()))
                } else {
                    None
                };

                match rescue {
                    Some(row) => {
                        log::warn!(
                            "Near-zero pivot {:e} at index {}, swapping with row {}",
                            a[(k, k)],
                            first + k as i64,
                            first + row as i64
                        );
                        a.swap_rows(k, row);
                        b.swap_rows(k, row);
                    }
                    None => {
                        return Err(FredholmError::instability(
                            "Gaussian elimination pivot",
                            first + k as i64,
                            a[(k, k)],
                        ));
                    }
                }
            }

            let pivot = a[(k, k)];
            for i in (k + 1)..n {
                let factor = a[(i, k)] / pivot;
                for c in k..n {
                    a[(i, c)] -= factor * a[(k, c)];
                }
                b[i] -= factor * b[k];
            }
        }

        // ====== Step 3: Back-substitution ======

        let mut x = b.clone();
        for i in (0..n).rev() {
            let mut sum = b[i];
            for c in (i + 1)..n {
                sum -= a[(i, c)] * x[c];
            }
            x[i] = sum / a[(i, i)];
        }

        // ====== Step 4: Result check ======

        if let Some(slot) = x.iter().position(|v| !v.is_finite()) {
            return Err(FredholmError::instability(
                "Gaussian elimination solution",
                first + slot as i64,
                x[slot],
            ));
        }

        log::debug!("Solved {}x{} system in {:?}", n, n, start.elapsed());

        Ok(ShiftedVector::from_storage(first, x))
    }

    fn name(&self) -> &str {
        if self.rescue_pivoting {
            "Gaussian elimination (rescue pivoting)"
        } else {
            "Gaussian elimination"
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
