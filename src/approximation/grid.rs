//! Primary and auxiliary grids
//!
//! # Primary grid
//!
//! Uniform partition of `[left, right]` into N cells, extended by four
//! fictitious nodes so that every basis function has its full three-cell
//! support:
//!
//! ```text
//! index   -2        -1       0     1    ...   N      N+1      N+2
//! node   left-2ε  left-ε   left   ...        right  right+ε  right+2ε
//! ```
//!
//! # Auxiliary grid
//!
//! One node per basis index −2..=N−1: the midpoint of the two inner knots
//! of the basis function, `aux[i] = (grid[i+1] + grid[i+2]) / 2`, except at
//! both ends where the node is pinned to the interval boundary:
//! `aux[−2] = grid[0]`, `aux[N−1] = grid[N]`.

use std::ops::{Index, RangeInclusive};

use crate::approximation::ShiftedVector;
use crate::equation::ProblemConfiguration;
use crate::error::{FredholmError, Result};

/// First index of the primary grid
pub const FIRST_NODE: i64 = -2;

/// First basis index
pub const FIRST_BASIS: i64 = -2;

// =================================================================================================
// Primary Grid
// =================================================================================================

/// Primary grid over indices −2..=N+2
///
/// Immutable once built. Strictly increasing in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    nodes: ShiftedVector,
    grid_points: usize,
}

impl Grid {
    /// Build the grid described by a configuration
    pub fn build(config: &ProblemConfiguration) -> Result<Self> {
        Self::uniform(config.left, config.right, config.grid_points, config.epsilon)
    }

    /// Uniform grid on `[left, right]` with N cells and fictitious offset `epsilon`
    ///
    /// # Errors
    ///
    /// Configuration error when N is zero, or when the nodes are not strictly
    /// increasing (zero-width cells, e.g. an interval too small for N in
    /// floating point).
    pub fn uniform(left: f64, right: f64, grid_points: usize, epsilon: f64) -> Result<Self> {
        if grid_points == 0 {
            return Err(FredholmError::configuration("Grid points must be at least 1"));
        }

        let n = grid_points as i64;
        let mut nodes = ShiftedVector::zeros(FIRST_NODE, n + 2);

        for i in 0..=n {
            let theta = i as f64 / grid_points as f64;
            nodes[i] = left + theta * (right - left);
        }

        nodes[-2] = nodes[0] - 2.0 * epsilon;
        nodes[-1] = nodes[0] - epsilon;
        nodes[n + 1] = nodes[n] + epsilon;
        nodes[n + 2] = nodes[n] + 2.0 * epsilon;

        let grid = Self { nodes, grid_points };

        if let Some(i) = grid.first_non_increasing() {
            return Err(FredholmError::configuration(format!(
                "Degenerate grid: node {} ({}) does not exceed node {} ({})",
                i + 1,
                grid.nodes[i + 1],
                i,
                grid.nodes[i]
            )));
        }

        Ok(grid)
    }

    /// Resolution N
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Node at `index`
    pub fn node(&self, index: i64) -> f64 {
        self.nodes[index]
    }

    /// Midpoint of the cell `[grid[index], grid[index+1]]`
    pub fn midpoint(&self, index: i64) -> f64 {
        0.5 * (self.nodes[index] + self.nodes[index + 1])
    }

    /// Left end of the interval (node 0)
    pub fn left(&self) -> f64 {
        self.nodes[0]
    }

    /// Right end of the interval (node N)
    pub fn right(&self) -> f64 {
        self.nodes[self.grid_points as i64]
    }

    /// All node indices, fictitious ones included
    pub fn node_indices(&self) -> RangeInclusive<i64> {
        self.nodes.indices()
    }

    /// Basis indices −2..=N−1
    pub fn basis_indices(&self) -> RangeInclusive<i64> {
        FIRST_BASIS..=self.last_basis()
    }

    /// Last basis index N−1
    pub fn last_basis(&self) -> i64 {
        self.grid_points as i64 - 1
    }

    /// Number of basis functions (N + 2)
    pub fn basis_count(&self) -> usize {
        self.grid_points + 2
    }

    /// Node storage
    pub fn nodes(&self) -> &ShiftedVector {
        &self.nodes
    }

    /// True when every node exceeds its predecessor
    pub fn is_strictly_increasing(&self) -> bool {
        self.first_non_increasing().is_none()
    }

    fn first_non_increasing(&self) -> Option<i64> {
        let last = self.nodes.last();
        (FIRST_NODE..last).find(|&i| !(self.nodes[i + 1] > self.nodes[i]))
    }
}

impl Index<i64> for Grid {
    type Output = f64;

    fn index(&self, index: i64) -> &f64 {
        &self.nodes[index]
    }
}

// =================================================================================================
// Auxiliary Grid
// =================================================================================================

/// Auxiliary grid over basis indices −2..=N−1
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryGrid {
    nodes: ShiftedVector,
}

impl AuxiliaryGrid {
    /// Derive from the primary grid
    pub fn build(grid: &Grid) -> Self {
        let last = grid.last_basis();
        let nodes = ShiftedVector::from_fn(FIRST_BASIS, last, |i| {
            if i == FIRST_BASIS {
                grid.left()
            } else if i == last {
                grid.right()
            } else {
                0.5 * (grid[i + 1] + grid[i + 2])
            }
        });
        Self { nodes }
    }

    /// Node at basis index `index`
    pub fn node(&self, index: i64) -> f64 {
        self.nodes[index]
    }

    /// Number of nodes (N + 2)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node storage
    pub fn nodes(&self) -> &ShiftedVector {
        &self.nodes
    }
}

impl Index<i64> for AuxiliaryGrid {
    type Output = f64;

    fn index(&self, index: i64) -> &f64 {
        &self.nodes[index]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
