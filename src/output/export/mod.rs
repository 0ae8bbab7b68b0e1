//! Export of sweep results
//!
//! # Available formats
//!
//! | Format  | Module    |
//! |---------|-----------|
//! | CSV     | [`csv`]   |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use fredholm_rs::output::export::{export_sweep_csv, CsvConfig, CsvMetadata};
//!
//! // Plain export
//! export_sweep_csv(&report, "sweep.csv", None)?;
//!
//! // With a metadata header and 12 decimals
//! let config = CsvConfig::high_precision().with_metadata(CsvMetadata::from_report(&report));
//! export_sweep_csv(&report, "sweep_precise.csv", Some(&config))?;
//! ```

pub mod csv;

pub use csv::{export_columns_csv, export_sweep_csv, CsvConfig, CsvMetadata, SWEEP_HEADERS};
