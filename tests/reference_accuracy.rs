//! Accuracy of every rule on the reference equation
//!
//! u(s) = sin(s) + ∫₀^{π/2} sin(s)·cos(t)·u(t) dt, exact solution 2·sin(s).
//! Errors are measured on the sweep points left + k·h/10.

use std::sync::Arc;

use fredholm_rs::approximation::{ApproximationEngine, ProjectionRule};
use fredholm_rs::equation::ProblemConfiguration;
use fredholm_rs::experiment::{run_sweep, SweepSettings};
use fredholm_rs::models::SeparableSine;

mod common;
use common::reference_engine;

/// (rule, bound on the direct error, bound on the Sloan error) at N = 15
const BOUNDS: [(ProjectionRule, f64, f64); 10] = [
    (ProjectionRule::SchoenbergMarsden, 1.0e-2, 5.0e-3),
    (ProjectionRule::Averaging, 1.5e-2, 3.0e-3),
    (ProjectionRule::DeBoorFix0, 3.0e-3, 3.0e-3),
    (ProjectionRule::DeBoorFix1, 5.0e-4, 5.0e-4),
    (ProjectionRule::DeBoorFix2, 5.0e-4, 5.0e-4),
    (ProjectionRule::Projection, 2.0e-3, 2.0e-4),
    (ProjectionRule::AveragingTrigonometric, 2.0e-3, 2.0e-4),
    (ProjectionRule::ProjectionTrigonometric, 2.0e-3, 2.0e-4),
    (ProjectionRule::AveragingHyperbolic, 2.0e-3, 2.0e-4),
    (ProjectionRule::ProjectionHyperbolic, 2.0e-3, 2.0e-4),
];

#[test]
fn test_reference_errors_per_rule() {
    for (rule, direct_bound, sloan_bound) in BOUNDS {
        let engine = reference_engine(rule, 15);
        let report = run_sweep(&engine, &SweepSettings::default_for(engine.config())).unwrap();

        println!(
            "{:<24} direct {:.3e}  sloan {:.3e}",
            rule.name(),
            report.max_error(),
            report.max_sloan_error()
        );

        assert!(
            report.max_error() < direct_bound,
            "{}: direct error {:e} above {:e}",
            rule, report.max_error(), direct_bound
        );
        assert!(
            report.max_sloan_error() < sloan_bound,
            "{}: Sloan error {:e} above {:e}",
            rule, report.max_sloan_error(), sloan_bound
        );
    }
}

#[test]
fn test_sloan_iteration_improves_every_rule() {
    for rule in ProjectionRule::supported() {
        let engine = reference_engine(rule, 15);
        let report = run_sweep(&engine, &SweepSettings::default_for(engine.config())).unwrap();

        assert!(
            report.max_sloan_error() < report.max_error(),
            "{}: Sloan {:e} not below direct {:e}",
            rule, report.max_sloan_error(), report.max_error()
        );
    }
}

#[test]
fn test_refinement_reduces_error() {
    let coarse = reference_engine(ProjectionRule::Averaging, 6);
    let fine = reference_engine(ProjectionRule::Averaging, 15);

    let coarse = run_sweep(&coarse, &SweepSettings::default_for(coarse.config())).unwrap();
    let fine = run_sweep(&fine, &SweepSettings::default_for(fine.config())).unwrap();

    assert!(coarse.max_sloan_error() < 1.5e-2);
    assert!(fine.max_sloan_error() < coarse.max_sloan_error() / 3.0);
    assert!(fine.max_error() < coarse.max_error());
}

#[test]
fn test_projection_on_coarse_grid() {
    let engine = reference_engine(ProjectionRule::Projection, 5);
    let report = run_sweep(&engine, &SweepSettings::default_for(engine.config())).unwrap();

    assert!(report.max_error() < 2e-3);
    assert!(report.max_sloan_error() < 3e-4);
}

#[test]
fn test_exact_solution_follows_the_interval() {
    // On [0, 1] the exact solution is c·sin(s) with c ≈ 1.548, not 2·sin(s)
    for (rule, direct_bound, sloan_bound) in [
        (ProjectionRule::Averaging, 8e-3, 5e-4),
        (ProjectionRule::Projection, 1.5e-3, 3e-5),
    ] {
        let config = ProblemConfiguration::new(Arc::new(SeparableSine::on(0.0, 1.0)), 0.0, 1.0)
            .with_rule(rule)
            .with_grid_points(15);
        let engine = ApproximationEngine::new(config).unwrap();
        let report = run_sweep(&engine, &SweepSettings::default_for(engine.config())).unwrap();

        assert!(report.max_error() < direct_bound, "{}: direct error {:e}", rule, report.max_error());
        assert!(report.max_sloan_error() < sloan_bound, "{}: Sloan error {:e}", rule, report.max_sloan_error());
    }
}

#[test]
fn test_sweep_metadata_names_the_run() {
    let engine = reference_engine(ProjectionRule::DeBoorFix1, 15);
    let report = run_sweep(&engine, &SweepSettings::default_for(engine.config())).unwrap();

    assert_eq!(report.rule, ProjectionRule::DeBoorFix1);
    assert_eq!(report.equation, "Separable Sine");
    assert_eq!(report.metadata().get("rule").map(String::as_str), Some("DeBoorFix1"));
    assert!(report.metadata().contains_key("solve time"));
}
