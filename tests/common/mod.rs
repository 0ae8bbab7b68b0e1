//! Common utilities for integration tests

pub mod mock_equations;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_equations::{ConstantKernel, ExponentialKernel};
pub use test_helpers::{engine_for, max_errors, reference_engine, sample_points};
