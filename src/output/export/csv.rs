//! CSV export of sweep results
//!
//! Writes sweep data to CSV (Comma-Separated Values), readable by
//! spreadsheets, pandas, MATLAB and most analysis tools.
//!
//! # Features
//!
//! - **Sweep export**: one row per sample point, six columns
//! - **Generic columns**: any set of equally long named series
//! - **Metadata support**: optional `#` header with run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: rejects NaN/Inf, empty data, mismatched lengths
//!
//! # Example
//!
//! ```rust,ignore
//! use fredholm_rs::output::export::{export_sweep_csv, CsvConfig, CsvMetadata};
//!
//! let report = run_sweep(&engine, &SweepSettings::default_for(engine.config()))?;
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_report(&report));
//!
//! export_sweep_csv(&report, "sweep.csv", Some(&config))?;
//! ```
//!
//! **Output** (`sweep.csv`):
//! ```csv
//! # Fredholm Sweep Data
//! # Generated: 2026-10-18T09:30:00+00:00
//! # Equation: Separable Sine
//! # Rule: Averaging
//! # Grid Points: 15
//! # Epsilon: 0.001
//! # Interval: [0, 1.5707963267948966]
//! #
//! point,exact,approximation,sloan,error,sloan_error
//! 0.000000,0.000000,0.000043,0.000000,0.000043,0.000000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::experiment::SweepReport;

/// Column headers of a sweep export
pub const SWEEP_HEADERS: [&str; 6] = ["point", "exact", "approximation", "sloan", "error", "sloan_error"];

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use fredholm_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    ///
    /// Errors of the better rules are below 1e-4; six places hide them.
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Equation name (e.g. "Separable Sine")
    pub equation: Option<String>,

    /// Projection rule (e.g. "Averaging")
    pub rule: Option<String>,

    /// Grid resolution N
    pub grid_points: Option<usize>,

    /// Fictitious point offset
    pub epsilon: Option<f64>,

    /// Integration interval
    pub interval: Option<(f64, f64)>,

    /// Largest Sloan error of the sweep
    pub max_sloan_error: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a sweep
    pub fn from_report(report: &SweepReport) -> Self {
        Self {
            equation: Some(report.equation.clone()),
            rule: Some(report.rule.name().to_string()),
            grid_points: Some(report.grid_points),
            epsilon: Some(report.epsilon),
            interval: Some(report.interval),
            max_sloan_error: Some(report.max_sloan_error()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments to file
fn write_metadata_header(file: &mut File, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# Fredholm Sweep Data")?;

    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(equation) = &metadata.equation {
        writeln!(file, "# Equation: {}", equation)?;
    }
    if let Some(rule) = &metadata.rule {
        writeln!(file, "# Rule: {}", rule)?;
    }
    if let Some(grid_points) = metadata.grid_points {
        writeln!(file, "# Grid Points: {}", grid_points)?;
    }
    if let Some(epsilon) = metadata.epsilon {
        writeln!(file, "# Epsilon: {}", epsilon)?;
    }
    if let Some((left, right)) = metadata.interval {
        writeln!(file, "# Interval: [{}, {}]", left, right)?;
    }
    if let Some(error) = metadata.max_sloan_error {
        writeln!(file, "# Max Sloan Error: {:e}", error)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    writeln!(file, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export named columns of equal length
///
/// # Errors
///
/// - no columns, or empty columns
/// - header count differs from column count
/// - columns of different lengths
/// - NaN or Inf values
/// - file creation / write errors
pub fn export_columns_csv(
    headers: &[&str],
    columns: &[Vec<f64>],
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if columns.is_empty() || columns[0].is_empty() {
        return Err("Empty data: at least one non-empty column is required".into());
    }

    if headers.len() != columns.len() {
        return Err(format!(
            "Data length mismatch: {} headers versus {} columns",
            headers.len(),
            columns.len()
        )
        .into());
    }

    let rows = columns[0].len();
    for (header, column) in headers.iter().zip(columns) {
        if column.len() != rows {
            return Err(format!(
                "Column [{}] length mismatch: {} values versus {} rows",
                header,
                column.len(),
                rows
            )
            .into());
        }
        if column.iter().any(|v| !v.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in column {}", header).into());
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let delimiter = configuration.delimiter.to_string();

    // ============================= Open File ==============================

    let mut file = File::create(output_path)?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    writeln!(file, "{}", headers.join(&delimiter))?;

    // ============================= Write Data =============================

    for i in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|column| format_number(column[i], configuration))
            .collect();
        writeln!(file, "{}", line.join(&delimiter))?;
    }

    Ok(())
}

/// Export a sweep: point, exact, approximation, sloan, error, sloan_error
///
/// # Example
///
/// ```rust,ignore
/// export_sweep_csv(&report, "sweep.csv", None)?;
/// ```
pub fn export_sweep_csv(
    report: &SweepReport,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let column = |f: fn(&crate::experiment::SweepRow) -> f64| -> Vec<f64> {
        report.rows.iter().map(f).collect()
    };

    let columns = vec![
        column(|row| row.point),
        column(|row| row.exact),
        column(|row| row.approximation),
        column(|row| row.sloan),
        column(|row| row.error),
        column(|row| row.sloan_error),
    ];

    export_columns_csv(&SWEEP_HEADERS, &columns, output_path, configuration)
}

// =================================================================================================
// Tests
// =================================================================================================
