//! Error sweep over the interval
//!
//! Sample points are `left + k·step` for k = 0, 1, ... while the point is
//! strictly below `right`. Points are computed from k rather than by
//! accumulating `step`, so the k-th point does not drift.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Instant;

use crate::approximation::{ApproximationEngine, ProjectionRule};
use crate::equation::ProblemConfiguration;
use crate::error::{FredholmError, Result};

/// The default step is the grid spacing divided by this factor
pub const SWEEP_REFINEMENT: usize = 10;

// =================================================================================================
// Settings
// =================================================================================================

/// Sampling step of the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSettings {
    pub step: f64,
}

impl SweepSettings {
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// (right − left) / N / 10
    pub fn default_for(config: &ProblemConfiguration) -> Self {
        Self::new(config.step() / SWEEP_REFINEMENT as f64)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(FredholmError::configuration(format!(
                "Sweep step must be positive, got {}",
                self.step
            )));
        }
        Ok(())
    }

    /// Sample points of `[left, right)`
    pub fn points(&self, left: f64, right: f64) -> Vec<f64> {
        (0_u64..)
            .map(|k| left + k as f64 * self.step)
            .take_while(|&p| p < right)
            .collect()
    }
}

// =================================================================================================
// Report
// =================================================================================================

/// One sampled point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    pub point: f64,
    pub exact: f64,
    pub approximation: f64,
    pub sloan: f64,
    pub error: f64,
    pub sloan_error: f64,
}

/// Result of a sweep
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub rule: ProjectionRule,
    pub equation: String,
    pub grid_points: usize,
    pub epsilon: f64,
    pub interval: (f64, f64),
    pub step: f64,
    pub rows: Vec<SweepRow>,
    metadata: HashMap<String, String>,
}

impl SweepReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest |u − direct approximation|, 0 for an empty sweep
    pub fn max_error(&self) -> f64 {
        self.rows.iter().fold(0.0, |acc, row| acc.max(row.error))
    }

    /// Largest |u − Sloan approximation|, 0 for an empty sweep
    pub fn max_sloan_error(&self) -> f64 {
        self.rows.iter().fold(0.0, |acc, row| acc.max(row.sloan_error))
    }

    pub fn points(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.point).collect()
    }

    /// Add metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Six-column text table: point, exact, direct, Sloan, both errors
    pub fn table(&self) -> String {
        let mut out = String::new();
        out.push_str("Point  Value   Appr    ApprSloan   Error    SloanError\n");
        out.push_str("---------------------------------------------------------\n");
        for row in &self.rows {
            // Writing into a String cannot fail
            let _ = writeln!(
                out,
                "{:.2}  {:.5} {:.5}  {:.5}    {:.5}    {:.5}",
                row.point, row.exact, row.approximation, row.sloan, row.error, row.sloan_error
            );
        }
        out
    }
}

// =================================================================================================
// Sweep
// =================================================================================================

/// Solve once, then evaluate both reconstructions at every sample point
///
/// # Errors
///
/// - `Configuration`: non-positive step, or the equation has no exact solution
/// - anything [`ApproximationEngine::solve`] returns
pub fn run_sweep(engine: &ApproximationEngine, settings: &SweepSettings) -> Result<SweepReport> {
    // ====== Step 1: Validation ======

    settings.validate()?;

    let config = engine.config();
    let equation = engine.equation();
    if equation.exact_solution(config.left).is_none() {
        return Err(FredholmError::configuration(format!(
            "Equation '{}' has no exact solution to compare against",
            equation.name()
        )));
    }

    // ====== Step 2: Solve ======

    let start = Instant::now();
    let solution = engine.solve()?;

    // ====== Step 3: Sample ======

    let points = settings.points(config.left, config.right);
    let mut rows = Vec::with_capacity(points.len());
    for point in points {
        let exact = equation.exact_solution(point).ok_or_else(|| {
            FredholmError::configuration(format!(
                "Equation '{}' has no exact solution at {}",
                equation.name(),
                point
            ))
        })?;
        let approximation = solution.approximate_at(point);
        let sloan = solution.sloan_approximate_at(point);

        rows.push(SweepRow {
            point,
            exact,
            approximation,
            sloan,
            error: (exact - approximation).abs(),
            sloan_error: (exact - sloan).abs(),
        });
    }

    // ====== Step 4: Build Report ======

    let mut report = SweepReport {
        rule: config.rule,
        equation: equation.name().to_string(),
        grid_points: config.grid_points,
        epsilon: config.epsilon,
        interval: (config.left, config.right),
        step: settings.step,
        rows,
        metadata: HashMap::new(),
    };
    for (key, value) in solution.metadata() {
        report.add_metadata(key, value);
    }
    report.add_metadata("regularization", &config.regularization.to_string());

    log::info!(
        "Sweep of {} points ({}): max error {:e}, max Sloan error {:e} in {:?}",
        report.len(),
        config.rule,
        report.max_error(),
        report.max_sloan_error(),
        start.elapsed()
    );

    Ok(report)
}

// =================================================================================================
// Tests
// =================================================================================================
