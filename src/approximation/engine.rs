//! Approximation engine
//!
//! # Pipeline
//!
//! ```text
//! ProblemConfiguration ──validate──► Grid + AuxiliaryGrid
//!                                        │
//!                      ProjectionRule::build (family + functional, all weights)
//!                                        │
//!                  LinearSystemAssembler ──► (I − M, μ) ──LinearSolver──► x
//!                                                                          │
//!            approximate_at(p)        = Σ_j x_j·B_j(p)                     │
//!            sloan_approximate_at(p)  = f(p) + Σ_j x_j·ω_j(p)  ◄───────────┘
//! ```
//!
//! Everything that can fail for a given configuration fails in
//! [`ApproximationEngine::new`], except the elimination itself.
//!
//! # Memoization
//!
//! The engine-level `approximate_at` and `sloan_approximate_at` assemble and
//! solve on every call. [`ApproximationEngine::solve`] returns a
//! [`Solution`] that holds the coefficients, for sweeps over many points.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::approximation::assembly::{LinearSystem, LinearSystemAssembler};
use crate::approximation::linear::{GaussianElimination, LinearSolver};
use crate::approximation::{
    AuxiliaryGrid, BasisFamily, CompositeQuadrature, Grid, ProjectionFunctional, ProjectionRule,
    Quadrature, ShiftedVector,
};
use crate::equation::{IntegralEquation, ProblemConfiguration};
use crate::error::Result;

// =================================================================================================
// Engine
// =================================================================================================

/// Projection solver for one configuration
///
/// # Example
///
/// ```rust
/// use fredholm_rs::approximation::ApproximationEngine;
/// use fredholm_rs::equation::ProblemConfiguration;
///
/// let engine = ApproximationEngine::new(ProblemConfiguration::reference())?;
/// let solution = engine.solve()?;
///
/// let p = 0.8;
/// let exact = 2.0 * f64::sin(p);
/// assert!((solution.sloan_approximate_at(p) - exact).abs() < 5e-3);
/// # Ok::<(), fredholm_rs::error::FredholmError>(())
/// ```
pub struct ApproximationEngine {
    config: ProblemConfiguration,
    grid: Grid,
    aux: AuxiliaryGrid,
    basis: Box<dyn BasisFamily>,
    functional: Box<dyn ProjectionFunctional>,
    quadrature: Box<dyn Quadrature>,
    solver: Box<dyn LinearSolver>,
}

impl ApproximationEngine {
    /// Validate the configuration, build both grids and the rule
    ///
    /// # Errors
    ///
    /// - `Configuration`: invalid parameters, unsupported rule, degenerate family
    /// - `NumericalInstability`: a derived stencil weight could not be computed
    pub fn new(config: ProblemConfiguration) -> Result<Self> {
        config.validate()?;

        let grid = Grid::build(&config)?;
        let aux = AuxiliaryGrid::build(&grid);
        let components = config.rule.build(&grid, &aux)?;

        log::info!(
            "Engine ready: {} on [{}, {}], N = {}, rule {} ({} basis, {})",
            config.equation.name(),
            config.left,
            config.right,
            config.grid_points,
            config.rule,
            components.basis.name(),
            components.functional.name()
        );

        Ok(Self {
            config,
            grid,
            aux,
            basis: components.basis,
            functional: components.functional,
            quadrature: Box::new(CompositeQuadrature::default()),
            solver: Box::new(GaussianElimination::new()),
        })
    }

    /// Builder pattern: replace the quadrature service
    pub fn with_quadrature<Q: Quadrature + 'static>(mut self, quadrature: Q) -> Self {
        self.quadrature = Box::new(quadrature);
        self
    }

    /// Builder pattern: replace the linear solver
    pub fn with_solver<S: LinearSolver + 'static>(mut self, solver: S) -> Self {
        self.solver = Box::new(solver);
        self
    }

    pub fn config(&self) -> &ProblemConfiguration {
        &self.config
    }

    pub fn equation(&self) -> &dyn IntegralEquation {
        self.config.equation.as_ref()
    }

    pub fn rule(&self) -> ProjectionRule {
        self.config.rule
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn auxiliary_grid(&self) -> &AuxiliaryGrid {
        &self.aux
    }

    pub fn basis(&self) -> &dyn BasisFamily {
        self.basis.as_ref()
    }

    pub fn functional(&self) -> &dyn ProjectionFunctional {
        self.functional.as_ref()
    }

    pub fn quadrature(&self) -> &dyn Quadrature {
        self.quadrature.as_ref()
    }

    pub fn solver(&self) -> &dyn LinearSolver {
        self.solver.as_ref()
    }

    /// Assembler bound to this engine's components
    pub fn assembler(&self) -> LinearSystemAssembler<'_> {
        LinearSystemAssembler::new(
            self.equation(),
            &self.grid,
            self.basis.as_ref(),
            self.functional.as_ref(),
            self.quadrature.as_ref(),
        )
    }

    /// (I − M, μ)
    pub fn assemble(&self) -> LinearSystem {
        self.assembler().assemble()
    }

    /// Assemble and solve (I − M)·x = μ
    pub fn coefficients(&self) -> Result<ShiftedVector> {
        let system = self.assemble();
        self.solver.solve(&system.matrix, &system.rhs)
    }

    /// Σ_j x_j·B_j(p), re-solving the system
    pub fn approximate_at(&self, point: f64) -> Result<f64> {
        let coefficients = self.coefficients()?;
        Ok(self.reconstruct(&coefficients, point))
    }

    /// f(p) + Σ_j x_j·ω_j(p), re-solving the system
    pub fn sloan_approximate_at(&self, point: f64) -> Result<f64> {
        let coefficients = self.coefficients()?;
        Ok(self.sloan_reconstruct(&coefficients, point))
    }

    /// Σ_j λ_j(f)·B_j(p): quasi-interpolant of `f`, independent of the equation
    pub fn approximate_functional(&self, f: &dyn Fn(f64) -> f64, point: f64) -> f64 {
        self.grid
            .basis_indices()
            .map(|j| self.functional.evaluate(j, f) * self.basis.value(j, &self.grid, point))
            .sum()
    }

    /// Assemble and solve once
    pub fn solve(&self) -> Result<Solution<'_>> {
        let start = Instant::now();
        let coefficients = self.coefficients()?;
        let elapsed = start.elapsed();

        log::debug!("Coefficients for {} computed in {:?}", self.config.rule, elapsed);

        let mut solution = Solution { engine: self, coefficients, metadata: HashMap::new() };
        solution.add_metadata("rule", self.config.rule.name());
        solution.add_metadata("basis", self.basis.name());
        solution.add_metadata("functional", self.functional.name());
        solution.add_metadata("quadrature", self.quadrature.name());
        solution.add_metadata("solver", self.solver.name());
        solution.add_metadata("grid points", &self.config.grid_points.to_string());
        solution.add_metadata("solve time", &format!("{:?}", elapsed));
        Ok(solution)
    }

    fn reconstruct(&self, coefficients: &ShiftedVector, point: f64) -> f64 {
        coefficients
            .iter()
            .map(|(j, x)| x * self.basis.value(j, &self.grid, point))
            .sum()
    }

    fn sloan_reconstruct(&self, coefficients: &ShiftedVector, point: f64) -> f64 {
        let assembler = self.assembler();
        let correction: f64 = coefficients
            .iter()
            .map(|(j, x)| x * assembler.kernel_weighted_integral(j, point))
            .sum();
        self.equation().source(point) + correction
    }
}

impl fmt::Debug for ApproximationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApproximationEngine")
            .field("config", &self.config)
            .field("basis", &self.basis.name())
            .field("functional", &self.functional.name())
            .field("quadrature", &self.quadrature.name())
            .field("solver", &self.solver.name())
            .finish()
    }
}

// =================================================================================================
// Solution
// =================================================================================================

/// Solved coefficients bound to their engine
pub struct Solution<'a> {
    engine: &'a ApproximationEngine,
    coefficients: ShiftedVector,
    metadata: HashMap<String, String>,
}

impl<'a> Solution<'a> {
    /// Coefficients x over −2..=N−1
    pub fn coefficients(&self) -> &ShiftedVector {
        &self.coefficients
    }

    pub fn engine(&self) -> &'a ApproximationEngine {
        self.engine
    }

    /// Σ_j x_j·B_j(p)
    pub fn approximate_at(&self, point: f64) -> f64 {
        self.engine.reconstruct(&self.coefficients, point)
    }

    /// f(p) + Σ_j x_j·ω_j(p)
    pub fn sloan_approximate_at(&self, point: f64) -> f64 {
        self.engine.sloan_reconstruct(&self.coefficients, point)
    }

    /// Add metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }
}

impl fmt::Debug for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("rule", &self.engine.rule())
            .field("coefficients", &self.coefficients)
            .field("metadata", &self.metadata)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClosureEquation, DegenerateKernel};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn reference(n: usize, rule: ProjectionRule) -> ApproximationEngine {
        ApproximationEngine::new(
            ProblemConfiguration::reference().with_grid_points(n).with_rule(rule),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_configuration_fails_at_construction() {
        let err = ApproximationEngine::new(ProblemConfiguration::reference().with_epsilon(0.0))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unsupported_rule_fails_at_construction() {
        let err = ApproximationEngine::new(
            ProblemConfiguration::reference().with_rule(ProjectionRule::DeBoorFix1Trigonometric),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_solution_matches_re_solving_paths() {
        let engine = reference(6, ProjectionRule::Averaging);
        let solution = engine.solve().unwrap();

        for p in [0.0, 0.3, 1.2] {
            assert_eq!(solution.approximate_at(p), engine.approximate_at(p).unwrap());
            assert_eq!(solution.sloan_approximate_at(p), engine.sloan_approximate_at(p).unwrap());
        }
    }

    #[test]
    fn test_coefficients_cover_basis_indices() {
        let engine = reference(7, ProjectionRule::SchoenbergMarsden);
        let x = engine.coefficients().unwrap();
        assert_eq!(x.indices(), -2..=6);
    }

    #[test]
    fn test_zero_kernel_sloan_equals_source() {
        let config = ProblemConfiguration::new(
            Arc::new(DegenerateKernel::new(|s| (2.0 * s).cos())),
            0.0,
            1.0,
        )
        .with_grid_points(6);
        let engine = ApproximationEngine::new(config).unwrap();
        let solution = engine.solve().unwrap();

        for p in [0.0, 0.25, 0.9] {
            assert_eq!(solution.sloan_approximate_at(p), (2.0 * p).cos());
        }
    }

    #[test]
    fn test_zero_kernel_direct_is_quasi_interpolant() {
        let config = ProblemConfiguration::new(Arc::new(DegenerateKernel::new(|s| s * s)), 0.0, 1.0)
            .with_grid_points(8)
            .with_rule(ProjectionRule::DeBoorFix1);
        let engine = ApproximationEngine::new(config).unwrap();
        let solution = engine.solve().unwrap();

        for p in [0.1, 0.5, 0.77] {
            assert_relative_eq!(
                solution.approximate_at(p),
                engine.approximate_functional(&|s| s * s, p),
                epsilon = 1e-12
            );
            assert_relative_eq!(solution.approximate_at(p), p * p, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_functional_reproduces_constants() {
        for rule in ProjectionRule::supported() {
            let engine = reference(6, rule);
            for p in [0.0, 0.4, 1.0, 1.5] {
                assert_relative_eq!(engine.approximate_functional(&|_| 3.0, p), 3.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_custom_quadrature_and_solver() {
        let engine = reference(5, ProjectionRule::Projection)
            .with_quadrature(CompositeQuadrature::new(200).unwrap())
            .with_solver(GaussianElimination::new().with_rescue_pivoting());
        assert!(engine.solver().name().contains("rescue"));

        let solution = engine.solve().unwrap();
        assert_eq!(solution.metadata().get("rule").map(String::as_str), Some("Projection"));
        assert!((solution.sloan_approximate_at(1.0) - 2.0 * 1.0_f64.sin()).abs() < 1e-2);
    }

    #[test]
    fn test_equation_without_exact_solution_still_solves() {
        let config = ProblemConfiguration::new(
            Arc::new(ClosureEquation::new("Exponential", |s, t| 0.1 * (s - t).exp(), |s| s)),
            0.0,
            1.0,
        )
        .with_grid_points(5);
        let engine = ApproximationEngine::new(config).unwrap();
        assert!(engine.sloan_approximate_at(0.5).unwrap().is_finite());
    }

    #[test]
    fn test_debug_names_components() {
        let engine = reference(4, ProjectionRule::AveragingHyperbolic);
        let text = format!("{:?}", engine);
        assert!(text.contains("Hyperbolic"));
        assert!(text.contains("Gaussian elimination"));
    }
}
