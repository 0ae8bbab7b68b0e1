//! Closure-backed equations
//!
//! Two ways of describing an equation without writing a new type:
//!
//! - [`ClosureEquation`]: kernel, source and optional exact solution given
//!   as closures
//! - [`DegenerateKernel`]: K ≡ 0, so the equation collapses to u = f; the
//!   exact solution is the source itself

use crate::equation::IntegralEquation;

type Kernel = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;
type Function = Box<dyn Fn(f64) -> f64 + Send + Sync>;

// =================================================================================================
// Closure Equation
// =================================================================================================

/// Equation defined by closures
///
/// # Example
///
/// ```rust
/// use fredholm_rs::equation::IntegralEquation;
/// use fredholm_rs::models::ClosureEquation;
///
/// let equation = ClosureEquation::new(
///     "Half constant",
///     |_s, _t| 0.5,
///     |_s| 1.0,
/// )
/// .with_exact_solution(|_s| 2.0);
///
/// assert_eq!(equation.exact_solution(0.3), Some(2.0));
/// ```
pub struct ClosureEquation {
    name: String,
    kernel: Kernel,
    source: Function,
    exact: Option<Function>,
}

impl ClosureEquation {
    /// Create an equation from a kernel and a source term
    pub fn new<K, F>(name: impl Into<String>, kernel: K, source: F) -> Self
    where
        K: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kernel: Box::new(kernel),
            source: Box::new(source),
            exact: None,
        }
    }

    /// Builder pattern: attach the exact solution
    pub fn with_exact_solution<U>(mut self, exact: U) -> Self
    where
        U: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.exact = Some(Box::new(exact));
        self
    }
}

impl IntegralEquation for ClosureEquation {
    fn kernel(&self, s: f64, t: f64) -> f64 {
        (self.kernel)(s, t)
    }

    fn source(&self, s: f64) -> f64 {
        (self.source)(s)
    }

    fn exact_solution(&self, s: f64) -> Option<f64> {
        self.exact.as_ref().map(|u| u(s))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// =================================================================================================
// Degenerate Kernel
// =================================================================================================

/// K ≡ 0: the equation reduces to u = f
///
/// The linear system becomes x = μ and the approximation is the plain
/// quasi-interpolant of the source. Useful to check the functionals in
/// isolation from the kernel.
pub struct DegenerateKernel {
    source: Function,
}

impl DegenerateKernel {
    /// Create from the source term
    pub fn new<F>(source: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { source: Box::new(source) }
    }
}

impl IntegralEquation for DegenerateKernel {
    fn kernel(&self, _s: f64, _t: f64) -> f64 {
        0.0
    }

    fn source(&self, s: f64) -> f64 {
        (self.source)(s)
    }

    fn exact_solution(&self, s: f64) -> Option<f64> {
        Some((self.source)(s))
    }

    fn name(&self) -> &str {
        "Degenerate Kernel"
    }

    fn description(&self) -> Option<&str> {
        Some("K(s,t) = 0, the solution equals the source term")
    }
}
