//! Helper functions for integration tests

use std::sync::Arc;

use fredholm_rs::approximation::{ApproximationEngine, ProjectionRule};
use fredholm_rs::equation::{IntegralEquation, ProblemConfiguration};

/// Engine on the reference equation with the given rule and resolution
pub fn reference_engine(rule: ProjectionRule, grid_points: usize) -> ApproximationEngine {
    let config = ProblemConfiguration::reference()
        .with_rule(rule)
        .with_grid_points(grid_points);
    ApproximationEngine::new(config).unwrap()
}

/// Engine for an arbitrary equation on [left, right]
pub fn engine_for(
    equation: impl IntegralEquation + 'static,
    left: f64,
    right: f64,
    rule: ProjectionRule,
    grid_points: usize,
) -> ApproximationEngine {
    let config = ProblemConfiguration::new(Arc::new(equation), left, right)
        .with_rule(rule)
        .with_grid_points(grid_points);
    ApproximationEngine::new(config).unwrap()
}

/// `count` evenly spaced points of [left, right], both ends included
pub fn sample_points(left: f64, right: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|k| left + (right - left) * k as f64 / (count - 1) as f64)
        .collect()
}

/// Largest direct and Sloan errors against the exact solution
pub fn max_errors(engine: &ApproximationEngine, points: &[f64]) -> (f64, f64) {
    let solution = engine.solve().unwrap();
    let equation = engine.equation();

    points.iter().fold((0.0_f64, 0.0_f64), |(direct, sloan), &p| {
        let exact = equation.exact_solution(p).unwrap();
        (
            direct.max((exact - solution.approximate_at(p)).abs()),
            sloan.max((exact - solution.sloan_approximate_at(p)).abs()),
        )
    })
}
