//! Minimal-spline projection method
//!
//! This module turns a [`ProblemConfiguration`](crate::equation::ProblemConfiguration)
//! into coefficients of a quadratic minimal-spline expansion and evaluates the
//! two reconstructions of the solution (direct and Sloan-corrected).
//!
//! # Module Organization
//!
//! - **`shifted`**: `ShiftedVector` / `ShiftedMatrix`, storage indexed from −2
//! - **`grid`**: primary grid (−2..=N+2) and auxiliary grid (−2..=N−1)
//! - **`basis`**: `BasisFamily` trait, algebraic / trigonometric / hyperbolic
//! - **`functionals`**: `ProjectionFunctional` trait and one type per rule family
//! - **`rule`**: `ProjectionRule`, the closed set of (family, functional) pairs
//! - **`quadrature`**: `Quadrature` trait, composite trapezoid/Simpson mean
//! - **`assembly`**: I, M, I − M, μ and the kernel-weighted basis integral
//! - **`linear`**: `LinearSolver` trait, Gaussian elimination
//! - **`engine`**: `ApproximationEngine` and its memoized `Solution`
//!
//! # Mathematical Background
//!
//! For u(s) = f(s) + ∫ K(s,t)·u(t) dt on [left, right], the approximation
//!
//! ```text
//! u ≈ Σ_j x_j·B_j,     j = −2..=N−1
//! ```
//!
//! is fixed by requiring λ_j(u) = x_j for the dual functionals λ_j of the
//! chosen rule, which leads to the (N+2)×(N+2) system (I − M)·x = μ.
//! Substituting the discrete solution back into the right-hand side of the
//! equation once more gives the Sloan iterate
//!
//! ```text
//! ũ(p) = f(p) + Σ_j x_j·∫ K(p,t)·B_j(t) dt
//! ```
//!
//! which is usually one order more accurate than the direct reconstruction.

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod shifted;
pub mod grid;
pub mod basis;
pub mod functionals;
pub mod rule;
pub mod quadrature;
pub mod assembly;
pub mod linear;
pub mod engine;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Matrix assembly switches to Rayon when the number of M entries, (N+2)²,
// exceeds this value and the crate is built with the `parallel` feature.
// Each entry costs several thousand kernel evaluations, so the crossover is
// far lower than for cheap element-wise work.
//
// Stored in an AtomicUsize so tests and benchmarks can change it at runtime.
// Relaxed ordering: the value is a performance hint, not a synchronisation
// point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of matrix entries above which assembly runs in parallel
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Current parallel-assembly threshold, in matrix entries
///
/// # Example
///
/// ```rust
/// use fredholm_rs::approximation::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-assembly threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use fredholm_rs::approximation::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(400);
/// assert_eq!(parallel_threshold(), 400);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that change the threshold
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Saves the current threshold on construction and restores it on drop
///
/// Holds a lock for its lifetime, so two guards never interleave.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the setter so restoring never panics
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use shifted::{ShiftedMatrix, ShiftedVector};
pub use grid::{AuxiliaryGrid, Grid};
pub use basis::{Algebraic, BasisFamily, Hyperbolic, Trigonometric};
pub use functionals::{ProjectionFunctional, Stencil};
pub use rule::{ProjectionRule, RuleComponents};
pub use quadrature::{CompositeQuadrature, Quadrature};
pub use assembly::{LinearSystem, LinearSystemAssembler};
pub use linear::{GaussianElimination, LinearSolver};
pub use engine::{ApproximationEngine, Solution};

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 64);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        // Every guard restores on drop, so the next one always sees the default
        let guard = ThresholdGuard::save(42);
        assert_eq!(parallel_threshold(), 42);
        assert_eq!(guard.previous, DEFAULT_PARALLEL_THRESHOLD);
    }
}
