//! fredholm-rs: Minimal-Spline Projection for Fredholm Equations
//!
//! Approximates the solution of linear Fredholm integral equations of the
//! second kind,
//!
//! ```text
//! u(s) = f(s) + ∫_a^b K(s,t)·u(t) dt,
//! ```
//!
//! by quadratic minimal splines (algebraic, trigonometric or hyperbolic)
//! combined with a projection rule, and improves the result with one Sloan
//! iteration.
//!
//! # Architecture
//!
//! fredholm-rs is built on two core principles:
//!
//! 1. **Separation of Equations and Numerics**
//!    - Equations define kernel and source (what to solve)
//!    - The approximation engine provides the method (how to solve)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait seams for equations, basis families, functionals, quadrature
//!      and linear solvers
//!    - Shifted index types keep the −2-based indexing out of user code
//!
//! # Quick Start
//!
//! ```rust
//! use fredholm_rs::prelude::*;
//! # fn main() -> Result<()> {
//! // 1. Configure the problem: reference equation, N = 15, Projection rule
//! let config = ProblemConfiguration::reference().with_rule(ProjectionRule::Projection);
//!
//! // 2. Build the engine and solve once
//! let engine = ApproximationEngine::new(config)?;
//! let solution = engine.solve()?;
//!
//! // 3. Evaluate both reconstructions
//! let s = 0.7;
//! let exact = 2.0 * f64::sin(s);
//! assert!((solution.approximate_at(s) - exact).abs() < 2e-3);
//! assert!((solution.sloan_approximate_at(s) - exact).abs() < 2e-4);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`equation`]: Equation trait and problem configuration
//! - [`models`]: Concrete equations
//! - [`approximation`]: Grids, bases, functionals, assembly, solver, engine
//! - [`experiment`]: Error sweeps against the exact solution
//! - [`output`]: CSV export and plots of sweeps
//! - [`error`]: Error type

// Core modules
pub mod error;
pub mod equation;
pub mod models;
pub mod approximation;

// Runs and results
pub mod experiment;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use fredholm_rs::prelude::*;
    //! ```
    pub use crate::error::{FredholmError, Result};
    pub use crate::equation::{IntegralEquation, ProblemConfiguration};
    pub use crate::models::{ClosureEquation, DegenerateKernel, SeparableSine};
    pub use crate::approximation::{ApproximationEngine,
                                   GaussianElimination,
                                   LinearSolver,
                                   ProjectionRule,
                                   Solution};
    pub use crate::experiment::{run_sweep, SweepReport, SweepSettings};
}
