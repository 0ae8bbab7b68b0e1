//! Integral equation trait
//!
//! This module defines the core API for the equations being approximated:
//! - `IntegralEquation`: the data of u(s) = f(s) + ∫ K(s,t) u(t) dt

// =================================================================================================
// Integral Equation Trait
// =================================================================================================

/// Second-kind Fredholm integral equation
///
/// ```text
/// u(s) = f(s) + ∫ K(s,t) u(t) dt
/// ```
///
/// # Responsibility
/// Provides the kernel `K`, the source term `f` and, when it is known, the
/// exact solution `u`. Does NOT approximate anything (that's the engine's job).
///
/// The equation provides the "problem" (functions), the engine provides the
/// "numerics" (grid, basis, functionals, linear system).
///
/// # Domain
/// The integration interval belongs to the [`ProblemConfiguration`](super::ProblemConfiguration),
/// not to the equation, so the same equation can be studied on several intervals.
/// Implementations must nevertheless be defined slightly outside the interval:
/// some projection rules sample at fictitious grid points.
pub trait IntegralEquation: Send + Sync {
    /// Kernel K(s, t)
    fn kernel(&self, s: f64, t: f64) -> f64;

    /// Source term f(s)
    fn source(&self, s: f64) -> f64;

    /// Exact solution u(s), used for error reporting only
    fn exact_solution(&self, _s: f64) -> Option<f64> {
        None
    }

    /// Name of the equation (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the equation (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl IntegralEquation for Identity {
        fn kernel(&self, _s: f64, _t: f64) -> f64 {
            0.0
        }

        fn source(&self, s: f64) -> f64 {
            s
        }

        fn name(&self) -> &str {
            "Identity"
        }
    }

    #[test]
    fn test_default_methods() {
        let equation = Identity;
        assert!(equation.exact_solution(0.5).is_none());
        assert!(equation.description().is_none());
        assert_eq!(equation.source(0.25), 0.25);
    }

    #[test]
    fn test_trait_object() {
        let equation: Box<dyn IntegralEquation> = Box::new(Identity);
        assert_eq!(equation.name(), "Identity");
        assert_eq!(equation.kernel(1.0, 2.0), 0.0);
    }
}
