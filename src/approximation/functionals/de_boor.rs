//! de Boor–Fix dual functionals
//!
//! For the quadratic B-spline on knots g_j < g_{j+1} < g_{j+2} < g_{j+3}
//! and any anchor τ in its support,
//!
//! ```text
//! λ_j(f) = f(τ) + (½(g_{j+1} + g_{j+2}) − τ)·f'(τ) + ½(g_{j+1} − τ)(g_{j+2} − τ)·f''(τ)
//! ```
//!
//! is exact on quadratics. The three anchors used here are τ = g_j, g_{j+1}
//! and g_{j+2}; at the two inner knots the f'' term vanishes.
//! Derivatives are central differences (see [`first_derivative`]).

use super::{ProjectionFunctional, Stencil, StencilTable, first_derivative, second_derivative};
use crate::approximation::{Grid, grid::FIRST_BASIS};

/// Anchor of the de Boor–Fix functional, relative to the first knot of B_j
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeBoorNode {
    /// τ = g_j
    Zero,
    /// τ = g_{j+1}
    One,
    /// τ = g_{j+2}
    Two,
}

impl DeBoorNode {
    fn offset(self) -> i64 {
        match self {
            DeBoorNode::Zero => 0,
            DeBoorNode::One => 1,
            DeBoorNode::Two => 2,
        }
    }
}

/// de Boor–Fix functional anchored at one knot
#[derive(Debug, Clone)]
pub struct DeBoorFix {
    node: DeBoorNode,
    stencils: StencilTable,
}

impl DeBoorFix {
    pub fn new(node: DeBoorNode, grid: &Grid) -> Self {
        let stencils = StencilTable::from_fn(FIRST_BASIS, grid.last_basis(), |j| {
            let tau = grid[j + node.offset()];
            let (g1, g2) = (grid[j + 1], grid[j + 2]);

            let mut stencil = Stencil::point(tau);
            let slope = 0.5 * (g1 + g2) - tau;
            if slope != 0.0 {
                stencil = stencil.plus(first_derivative(tau).scaled(slope));
            }
            let curvature = 0.5 * (g1 - tau) * (g2 - tau);
            if curvature != 0.0 {
                stencil = stencil.plus(second_derivative(tau).scaled(curvature));
            }
            stencil
        });

        Self { node, stencils }
    }

    /// Anchor knot
    pub fn node(&self) -> DeBoorNode {
        self.node
    }
}

impl ProjectionFunctional for DeBoorFix {
    fn name(&self) -> &'static str {
        match self.node {
            DeBoorNode::Zero => "de Boor-Fix (g_j)",
            DeBoorNode::One => "de Boor-Fix (g_j+1)",
            DeBoorNode::Two => "de Boor-Fix (g_j+2)",
        }
    }

    fn stencil(&self, j: i64) -> &Stencil {
        self.stencils.get(j)
    }
}
