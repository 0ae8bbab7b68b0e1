//! Schoenberg–Marsden functional: λ_j(f) = f(aux[j])
//!
//! The simplest quasi-interpolant. Reproduces linear functions away from
//! the boundary, but not quadratics.

use super::{ProjectionFunctional, Stencil, StencilTable};
use crate::approximation::{AuxiliaryGrid, grid::FIRST_BASIS};

/// Point evaluation at the auxiliary node
#[derive(Debug, Clone)]
pub struct SchoenbergMarsden {
    stencils: StencilTable,
}

impl SchoenbergMarsden {
    /// Build over every auxiliary node
    pub fn new(aux: &AuxiliaryGrid) -> Self {
        let last = FIRST_BASIS + aux.len() as i64 - 1;
        Self {
            stencils: StencilTable::from_fn(FIRST_BASIS, last, |j| Stencil::point(aux[j])),
        }
    }
}

impl ProjectionFunctional for SchoenbergMarsden {
    fn name(&self) -> &'static str {
        "Schoenberg-Marsden"
    }

    fn stencil(&self, j: i64) -> &Stencil {
        self.stencils.get(j)
    }
}
