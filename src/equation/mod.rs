//! Integral equations
//!
//! This module provides the trait describing a second-kind Fredholm equation
//! and the configuration that fixes how it is discretised.
//!
//! # Core Concepts
//!
//! - **Integral Equation**: kernel K(s,t), source f(s), optional exact u(s)
//! - **Problem Configuration**: interval, resolution, fictitious offset, rule
//!
//! # Architecture
//!
//! Equations are **separate from the approximation engine**:
//! - The equation provides the **functions** (problem)
//! - The engine provides the **method** (numerics)
//!
//! This separation allows:
//! - Same equation with different projection rules
//! - Same rule with different equations
//!
//! # Example
//!
//! ```rust
//! use fredholm_rs::equation::{IntegralEquation, ProblemConfiguration};
//!
//! struct Constant;
//!
//! impl IntegralEquation for Constant {
//!     fn kernel(&self, _s: f64, _t: f64) -> f64 { 0.5 }
//!     fn source(&self, _s: f64) -> f64 { 1.0 }
//!     fn exact_solution(&self, _s: f64) -> Option<f64> { Some(2.0) }
//!     fn name(&self) -> &str { "Constant" }
//! }
//!
//! let config = ProblemConfiguration::new(std::sync::Arc::new(Constant), 0.0, 1.0);
//! assert!(config.validate().is_ok());
//! ```

pub mod traits;
pub mod configuration;

pub use configuration::{
    ProblemConfiguration,
    DEFAULT_EPSILON,
    DEFAULT_GRID_POINTS,
    DEFAULT_REGULARIZATION,
};
pub use traits::IntegralEquation;
