//! Visualization of sweep results
//!
//! Plots are drawn with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **sweep**: Solution and error curves of a [`SweepReport`](crate::experiment::SweepReport)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fredholm_rs::output::visualization::{plot_sweep, PlotConfig};
//!
//! let report = run_sweep(&engine, &SweepSettings::default_for(engine.config()))?;
//!
//! // Default config
//! plot_sweep(&report, "solution.png", None)?;
//!
//! // Or with a custom title
//! let config = PlotConfig::sweep("Sloan iterate, N = 15");
//! plot_sweep(&report, "solution.svg", Some(&config))?;
//! ```
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Exact vs direct vs Sloan | `plot_sweep` |
//! | Pointwise errors | `plot_sweep_errors` |

pub mod config;
pub mod sweep;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use sweep::{plot_sweep, plot_sweep_errors};
