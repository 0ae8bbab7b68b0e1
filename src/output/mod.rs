//! Output of sweep results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── sweep.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fredholm_rs::output::{export_sweep_csv, plot_sweep};
//!
//! plot_sweep(&report, "solution.png", None)?;
//! export_sweep_csv(&report, "sweep.csv", None)?;
//! ```
//!
//! Both sub-modules read a [`SweepReport`](crate::experiment::SweepReport)
//! and return `Box<dyn Error>` so callers can mix them with I/O errors.

pub mod visualization;
pub mod export;

pub use visualization::{
    plot_sweep,
    plot_sweep_errors,
    PlotConfig,
};

pub use export::{
    export_columns_csv,
    export_sweep_csv,
    CsvConfig,
    CsvMetadata,
};
