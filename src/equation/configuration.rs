//! Problem configuration
//!
//! A `ProblemConfiguration` bundles the equation with every parameter of its
//! discretisation. It is immutable for the lifetime of an engine.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::sync::Arc;

use crate::approximation::ProjectionRule;
use crate::equation::IntegralEquation;
use crate::error::{FredholmError, Result};
use crate::models::SeparableSine;

/// Default grid resolution N
pub const DEFAULT_GRID_POINTS: usize = 15;

/// Default offset of the fictitious points
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Default regularization constant (stored, not used by the formulas)
pub const DEFAULT_REGULARIZATION: f64 = 1e-10;

// =================================================================================================
// Problem Configuration
// =================================================================================================

/// Equation + discretisation parameters
///
/// # Fields
///
/// - `equation`: kernel, source and optional exact solution
/// - `left`, `right`: integration interval
/// - `grid_points`: resolution N (N + 1 interior nodes)
/// - `epsilon`: spacing of the four fictitious nodes outside `[left, right]`
/// - `regularization`: declared constant, carried for reporting only
/// - `rule`: projection rule, which also fixes the basis family
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use fredholm_rs::equation::ProblemConfiguration;
/// use fredholm_rs::approximation::ProjectionRule;
/// use fredholm_rs::models::SeparableSine;
///
/// let config = ProblemConfiguration::new(Arc::new(SeparableSine::on(0.0, 1.0)), 0.0, 1.0)
///     .with_grid_points(20)
///     .with_rule(ProjectionRule::Projection);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct ProblemConfiguration {
    /// The equation to approximate
    pub equation: Arc<dyn IntegralEquation>,

    /// Left end of the interval
    pub left: f64,

    /// Right end of the interval
    pub right: f64,

    /// Grid resolution N
    pub grid_points: usize,

    /// Offset of the fictitious points
    pub epsilon: f64,

    /// Regularization constant
    ///
    /// Not referenced by the assembly: the system solved is (I − M)x = μ
    /// without a Tikhonov term.
    pub regularization: f64,

    /// Active projection rule
    pub rule: ProjectionRule,
}

impl ProblemConfiguration {
    /// Create a configuration with default discretisation parameters
    pub fn new(equation: Arc<dyn IntegralEquation>, left: f64, right: f64) -> Self {
        Self {
            equation,
            left,
            right,
            grid_points: DEFAULT_GRID_POINTS,
            epsilon: DEFAULT_EPSILON,
            regularization: DEFAULT_REGULARIZATION,
            rule: ProjectionRule::Averaging,
        }
    }

    /// The reference experiment
    ///
    /// K(s,t) = sin(s)·cos(t), f(s) = sin(s), u(s) = 2·sin(s) on [0, π/2],
    /// N = 15, Sablonnière averaging.
    pub fn reference() -> Self {
        Self::new(Arc::new(SeparableSine::reference()), 0.0, FRAC_PI_2)
    }

    /// Builder pattern: set grid resolution
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    /// Builder pattern: set fictitious point offset
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder pattern: set regularization constant
    pub fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    /// Builder pattern: set projection rule
    pub fn with_rule(mut self, rule: ProjectionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Number of unknowns (basis indices −2..=N−1)
    pub fn unknowns(&self) -> usize {
        self.grid_points + 2
    }

    /// Uniform spacing of the interior nodes
    pub fn step(&self) -> f64 {
        (self.right - self.left) / self.grid_points as f64
    }

    /// Validate configuration
    ///
    /// Rule support itself is checked when the rule is built, see
    /// [`ProjectionRule::build`].
    pub fn validate(&self) -> Result<()> {
        if !self.left.is_finite() || !self.right.is_finite() {
            return Err(FredholmError::configuration("Interval bounds must be finite"));
        }
        if self.left >= self.right {
            return Err(FredholmError::configuration(format!(
                "Interval must satisfy left < right, got [{}, {}]",
                self.left, self.right
            )));
        }
        if self.grid_points == 0 {
            return Err(FredholmError::configuration("Grid points must be at least 1"));
        }
        let minimum = self.rule.min_grid_points();
        if self.grid_points < minimum {
            return Err(FredholmError::configuration(format!(
                "Rule {} needs at least {} grid points, got {}",
                self.rule.name(),
                minimum,
                self.grid_points
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(FredholmError::configuration(format!(
                "Fictitious point offset must be positive, got {}",
                self.epsilon
            )));
        }
        if !self.regularization.is_finite() {
            return Err(FredholmError::configuration("Regularization constant is not finite"));
        }
        Ok(())
    }
}

impl fmt::Debug for ProblemConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemConfiguration")
            .field("equation", &self.equation.name())
            .field("interval", &(self.left, self.right))
            .field("grid points", &self.grid_points)
            .field("epsilon", &self.epsilon)
            .field("regularization", &self.regularization)
            .field("rule", &self.rule)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_configuration() {
        let config = ProblemConfiguration::reference();
        assert_eq!(config.grid_points, 15);
        assert_eq!(config.left, 0.0);
        assert_eq!(config.right, FRAC_PI_2);
        assert_eq!(config.epsilon, 1e-3);
        assert_eq!(config.regularization, 1e-10);
        assert_eq!(config.rule, ProjectionRule::Averaging);
        assert_eq!(config.unknowns(), 17);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ProblemConfiguration::reference()
            .with_grid_points(8)
            .with_epsilon(1e-4)
            .with_regularization(0.0)
            .with_rule(ProjectionRule::DeBoorFix1);

        assert_eq!(config.grid_points, 8);
        assert_eq!(config.epsilon, 1e-4);
        assert_eq!(config.regularization, 0.0);
        assert_eq!(config.rule, ProjectionRule::DeBoorFix1);
        assert!((config.step() - FRAC_PI_2 / 8.0).abs() < 1e-15);
    }

    #[test]
    fn test_zero_grid_points_rejected() {
        let err = ProblemConfiguration::reference()
            .with_grid_points(0)
            .validate()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Grid points"));
    }

    #[test]
    fn test_projection_rules_minimum_resolution() {
        for n in [1, 2] {
            let config = ProblemConfiguration::reference()
                .with_rule(ProjectionRule::Projection)
                .with_grid_points(n);
            assert!(config.validate().is_ok());
        }

        let derived = ProblemConfiguration::reference()
            .with_rule(ProjectionRule::ProjectionTrigonometric)
            .with_grid_points(2);
        assert!(derived.validate().unwrap_err().to_string().contains("at least 3"));
        assert!(derived.with_grid_points(3).validate().is_ok());
    }

    #[test]
    fn test_non_positive_epsilon_rejected() {
        assert!(ProblemConfiguration::reference().with_epsilon(0.0).validate().is_err());
        assert!(ProblemConfiguration::reference().with_epsilon(-1e-3).validate().is_err());
        assert!(ProblemConfiguration::reference().with_epsilon(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let config = ProblemConfiguration::new(Arc::new(SeparableSine::on(1.0, 0.0)), 1.0, 0.0);
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_debug_shows_equation_name() {
        let text = format!("{:?}", ProblemConfiguration::reference());
        assert!(text.contains("Separable Sine"));
    }
}
