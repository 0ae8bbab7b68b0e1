//! Experiments on a solved engine
//!
//! The error sweep samples the interval at a fine uniform step, compares the
//! direct and the Sloan-corrected reconstructions against the exact solution
//! and reports the largest deviation of each.
//!
//! # Example
//!
//! ```rust
//! use fredholm_rs::approximation::ApproximationEngine;
//! use fredholm_rs::equation::ProblemConfiguration;
//! use fredholm_rs::experiment::{run_sweep, SweepSettings};
//!
//! let engine = ApproximationEngine::new(ProblemConfiguration::reference())?;
//! let settings = SweepSettings::default_for(engine.config());
//! let report = run_sweep(&engine, &settings)?;
//!
//! assert!(report.max_sloan_error() < 3e-3);
//! println!("{}", report.table());
//! # Ok::<(), fredholm_rs::error::FredholmError>(())
//! ```

pub mod sweep;

pub use sweep::{run_sweep, SweepReport, SweepRow, SweepSettings, SWEEP_REFINEMENT};
