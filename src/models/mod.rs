//! Concrete integral equations
//!
//! All models implement the [`IntegralEquation`](crate::equation::IntegralEquation)
//! trait. A model supplies the kernel, the source term and, when known, the
//! exact solution; the approximation engine does the rest.
//!
//! # Available Models
//!
//! ## [`SeparableSine`]: the reference equation
//!
//! K(s,t) = sin(s)·cos(t), f(s) = sin(s) on [0, π/2], exact solution
//! u(s) = 2·sin(s). Rank-one kernel, so the exact solution is known in
//! closed form on any interval.
//!
//! ## [`ClosureEquation`]: ad-hoc equations
//!
//! Kernel, source and optional exact solution given as closures.
//!
//! ## [`DegenerateKernel`]: K ≡ 0
//!
//! The equation collapses to u = f, isolating the projection functionals
//! from the kernel.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod separable_sine;
pub mod closure;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use separable_sine::SeparableSine;
pub use closure::{ClosureEquation, DegenerateKernel};
