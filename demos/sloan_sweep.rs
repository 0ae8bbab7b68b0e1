//! Example: Sloan iteration on the separable sine equation
//!
//! Solves
//!
//! ```text
//! u(s) = sin(s) + ∫₀^{π/2} sin(s)·cos(t)·u(t) dt,     u(s) = 2·sin(s)
//! ```
//!
//! with quadratic minimal splines, prints the error table of the direct
//! and Sloan-corrected approximations, then compares all rules.
//!
//! **Usage**:
//!
//! ```bash
//! cargo run --example sloan_sweep                 # Averaging, N = 15
//! cargo run --example sloan_sweep -- Projection 20
//! ```
//!
//! **Outputs**: `sloan_sweep.csv`, `sloan_sweep.png`, `sloan_errors.png`

use fredholm_rs::{
    approximation::{ApproximationEngine, ProjectionRule},
    equation::ProblemConfiguration,
    experiment::{run_sweep, SweepSettings},
    output::{export_sweep_csv, plot_sweep, plot_sweep_errors, CsvConfig, CsvMetadata},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let rule: ProjectionRule = match args.next() {
        Some(name) => name.parse()?,
        None => ProjectionRule::Averaging,
    };
    let grid_points: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 15,
    };

    println!("═══════════════════════════════════════════════════════");
    println!("  Fredholm Equation - Minimal Splines + Sloan Iteration");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Problem ======

    let config = ProblemConfiguration::reference()
        .with_rule(rule)
        .with_grid_points(grid_points);

    println!("Problem:");
    println!("  Equation       : {}", config.equation.name());
    println!("  Interval       : [{}, {:.6}]", config.left, config.right);
    println!("  Grid points    : {}", config.grid_points);
    println!("  Epsilon        : {}", config.epsilon);
    println!("  Rule           : {} ({} basis)\n", rule, rule.family_name());

    // ====== Sweep ======

    let start = Instant::now();
    let engine = ApproximationEngine::new(config)?;
    let report = run_sweep(&engine, &SweepSettings::default_for(engine.config()))?;
    let elapsed = start.elapsed().as_secs_f64();

    print!("{}", report.table());
    println!("{:-<57}", "");
    println!("Max error        : {:.6e}", report.max_error());
    println!("Max Sloan error  : {:.6e}", report.max_sloan_error());
    println!("Time             : {:.3}s", elapsed);

    // ====== All rules ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Rule Comparison (N = {})", grid_points);
    println!("═══════════════════════════════════════════════════════\n");

    println!("{:<26} {:>12} {:>12}", "Rule", "Error", "Sloan");
    println!("{:-<52}", "");

    for candidate in ProjectionRule::ALL {
        let config = ProblemConfiguration::reference()
            .with_rule(candidate)
            .with_grid_points(grid_points);

        match ApproximationEngine::new(config)
            .and_then(|engine| run_sweep(&engine, &SweepSettings::default_for(engine.config())))
        {
            Ok(r) => println!(
                "{:<26} {:>12.3e} {:>12.3e}",
                candidate.name(),
                r.max_error(),
                r.max_sloan_error()
            ),
            Err(e) => println!("{:<26} {}", candidate.name(), e),
        }
    }

    // ====== Output ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Writing Output");
    println!("═══════════════════════════════════════════════════════\n");

    let csv_config = CsvConfig::high_precision().with_metadata(CsvMetadata::from_report(&report));
    export_sweep_csv(&report, "sloan_sweep.csv", Some(&csv_config))?;
    println!("  CSV    : sloan_sweep.csv");

    plot_sweep(&report, "sloan_sweep.png", None)?;
    println!("  Plot   : sloan_sweep.png");

    plot_sweep_errors(&report, "sloan_errors.png", None)?;
    println!("  Errors : sloan_errors.png");

    Ok(())
}
