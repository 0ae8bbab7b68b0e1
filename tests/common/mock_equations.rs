//! Equations with closed-form solutions for integration tests

use fredholm_rs::equation::IntegralEquation;

/// K(s,t) = k, f(s) = 1 on [0, 1]
///
/// u is constant: u = 1 + k·u, so u = 1 / (1 − k).
pub struct ConstantKernel {
    pub k: f64,
}

impl ConstantKernel {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl IntegralEquation for ConstantKernel {
    fn kernel(&self, _s: f64, _t: f64) -> f64 {
        self.k
    }

    fn source(&self, _s: f64) -> f64 {
        1.0
    }

    fn exact_solution(&self, _s: f64) -> Option<f64> {
        Some(1.0 / (1.0 - self.k))
    }

    fn name(&self) -> &str {
        "ConstantKernel"
    }
}

/// K(s,t) = e^{s−t}/2, f(s) = e^s/2 on [0, 1]
///
/// u(s) = c·e^s with c = 1/2 + c/2, so u(s) = e^s.
pub struct ExponentialKernel;

impl IntegralEquation for ExponentialKernel {
    fn kernel(&self, s: f64, t: f64) -> f64 {
        0.5 * (s - t).exp()
    }

    fn source(&self, s: f64) -> f64 {
        0.5 * s.exp()
    }

    fn exact_solution(&self, s: f64) -> Option<f64> {
        Some(s.exp())
    }

    fn name(&self) -> &str {
        "ExponentialKernel"
    }
}
