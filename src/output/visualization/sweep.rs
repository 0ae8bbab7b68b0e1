//! Plots of sweep results
//!
//! # Available functions
//!
//! - [`plot_sweep`]        : exact solution, direct and Sloan approximations vs s
//! - [`plot_sweep_errors`] : |u − approximation| and |u − Sloan| vs s
//!
//! The backend is chosen from the file extension: `.svg` writes a vector
//! image, anything else a bitmap.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fredholm_rs::output::visualization::{plot_sweep, plot_sweep_errors, PlotConfig};
//!
//! let report = run_sweep(&engine, &SweepSettings::default_for(engine.config()))?;
//! plot_sweep(&report, "solution.png", None)?;
//! plot_sweep_errors(&report, "errors.svg", Some(&PlotConfig::errors("Averaging")))?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::experiment::SweepReport;

/// One named curve
struct Series<'a> {
    label: &'a str,
    values: Vec<f64>,
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot the exact solution and both reconstructions over the sweep points
///
/// # Errors
///
/// Returns `Err` for an empty report or if the backend cannot write to
/// `output_path`.
pub fn plot_sweep(
    report: &SweepReport,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::sweep(format!("{}, N = {}", report.rule, report.grid_points));
    let config = config.unwrap_or(&default_config);

    let series = [
        Series { label: "Exact", values: report.rows.iter().map(|r| r.exact).collect() },
        Series { label: "Direct", values: report.rows.iter().map(|r| r.approximation).collect() },
        Series { label: "Sloan", values: report.rows.iter().map(|r| r.sloan).collect() },
    ];

    plot_series(report, &series, output_path, config)
}

/// Plot both pointwise errors over the sweep points
///
/// # Errors
///
/// Returns `Err` for an empty report or if the backend cannot write to
/// `output_path`.
pub fn plot_sweep_errors(
    report: &SweepReport,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::errors(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let series = [
        Series { label: "Direct error", values: report.rows.iter().map(|r| r.error).collect() },
        Series { label: "Sloan error", values: report.rows.iter().map(|r| r.sloan_error).collect() },
    ];

    plot_series(report, &series, output_path, config)
}

// =================================================================================================
// Rendering
// =================================================================================================

fn plot_series(
    report: &SweepReport,
    series: &[Series<'_>],
    output_path: &str,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if report.is_empty() {
        return Err("Empty data: the sweep has no points".into());
    }

    let points = report.points();
    let (left, right) = report.interval;

    let (mut lower, mut upper) = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lower.is_finite() || !upper.is_finite() {
        return Err("Invalid data: NaN or Inf detected in sweep".into());
    }
    let pad = ((upper - lower) * 0.05).max(1e-10);
    lower -= pad;
    upper += pad;

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_series_impl(backend, &points, series, config, (left, right), (lower, upper))
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_series_impl(backend, &points, series, config, (left, right), (lower, upper))
        }
    }
}

fn plot_series_impl<DB: DrawingBackend>(
    backend: DB,
    points: &[f64],
    series: &[Series<'_>],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(&root);
    if config.show_caption {
        builder.caption(&config.title, ("sans-serif", 40).into_font());
    }

    let mut chart = builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2e}", y))
            .draw()?;
    }

    for (k, curve) in series.iter().enumerate() {
        let color = config.get_series_color(k);
        let width = config.line_width;

        chart
            .draw_series(LineSeries::new(
                points.iter().zip(curve.values.iter()).map(|(p, v)| (*p, *v)),
                color.stroke_width(width),
            ))?
            .label(curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approximation::{ApproximationEngine, ProjectionRule};
    use crate::equation::ProblemConfiguration;
    use crate::experiment::{run_sweep, SweepSettings};
    use tempfile::NamedTempFile;

    fn report() -> SweepReport {
        let config = ProblemConfiguration::reference()
            .with_grid_points(5)
            .with_rule(ProjectionRule::Projection);
        let engine = ApproximationEngine::new(config).unwrap();
        run_sweep(&engine, &SweepSettings::new(0.05)).unwrap()
    }

    #[test]
    fn test_plot_sweep_png() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        let path = path.to_str().unwrap();

        plot_sweep(&report(), path, None).unwrap();
        assert!(std::path::Path::new(path).exists());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_plot_errors_svg() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        let path = path.to_str().unwrap();

        let mut config = PlotConfig::errors("Projection, N = 5");
        config.show_legend = false;
        plot_sweep_errors(&report(), path, Some(&config)).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("<svg"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_plot_curves_only_png() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        let path = path.to_str().unwrap();

        let config = PlotConfig::sweep(NO_TITLE).curves_only();
        plot_sweep(&report(), path, Some(&config)).unwrap();
        assert!(std::fs::metadata(path).unwrap().len() > 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_report_rejected() {
        let mut empty = report();
        empty.rows.clear();
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        assert!(plot_sweep(&empty, path.to_str().unwrap(), None).is_err());
    }
}
