//! Projection rules
//!
//! A rule fixes, for a whole run, both the basis family and the functional.
//! Both are produced together by [`ProjectionRule::build`] so that they can
//! never be paired inconsistently.
//!
//! | Rule                        | Family        | Functional                     |
//! |-----------------------------|---------------|--------------------------------|
//! | `SchoenbergMarsden`         | Algebraic     | f(aux[j])                      |
//! | `Averaging`                 | Algebraic     | Sablonnière (−⅛, 5/4, −⅛)      |
//! | `DeBoorFix0/1/2`            | Algebraic     | de Boor–Fix at g_j, g_j+1, g_j+2 |
//! | `Projection`                | Algebraic     | exact projection               |
//! | `AveragingTrigonometric`    | Trigonometric | derived 3-point averaging      |
//! | `ProjectionTrigonometric`   | Trigonometric | derived exact projection       |
//! | `DeBoorFix1Trigonometric`   | Trigonometric | *none*                         |
//! | `DeBoorFix2Trigonometric`   | Trigonometric | *none*                         |
//! | `AveragingHyperbolic`       | Hyperbolic    | derived 3-point averaging      |
//! | `ProjectionHyperbolic`      | Hyperbolic    | derived exact projection       |
//!
//! The two trigonometric de Boor–Fix rules have a basis family but no
//! functional; building them is a configuration error.

use std::fmt;
use std::str::FromStr;

use crate::approximation::basis::{Algebraic, BasisFamily, Hyperbolic, Trigonometric};
use crate::approximation::functionals::{
    Averaging, DeBoorFix, DeBoorNode, ExactProjection, ProjectionFunctional, SchoenbergMarsden,
    projection,
};
use crate::approximation::{AuxiliaryGrid, Grid};
use crate::error::{FredholmError, Result};

/// Closed set of projection rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionRule {
    SchoenbergMarsden,
    /// Sablonnière averaging
    Averaging,
    DeBoorFix0,
    DeBoorFix1,
    DeBoorFix2,
    Projection,
    AveragingTrigonometric,
    ProjectionTrigonometric,
    DeBoorFix1Trigonometric,
    DeBoorFix2Trigonometric,
    AveragingHyperbolic,
    ProjectionHyperbolic,
}

/// Basis family and functional of one rule, built on one grid
#[derive(Debug)]
pub struct RuleComponents {
    pub basis: Box<dyn BasisFamily>,
    pub functional: Box<dyn ProjectionFunctional>,
}

impl ProjectionRule {
    /// Every rule, supported or not
    pub const ALL: [ProjectionRule; 12] = [
        ProjectionRule::SchoenbergMarsden,
        ProjectionRule::Averaging,
        ProjectionRule::DeBoorFix0,
        ProjectionRule::DeBoorFix1,
        ProjectionRule::DeBoorFix2,
        ProjectionRule::Projection,
        ProjectionRule::AveragingTrigonometric,
        ProjectionRule::ProjectionTrigonometric,
        ProjectionRule::DeBoorFix1Trigonometric,
        ProjectionRule::DeBoorFix2Trigonometric,
        ProjectionRule::AveragingHyperbolic,
        ProjectionRule::ProjectionHyperbolic,
    ];

    /// Rules that can be built
    pub fn supported() -> impl Iterator<Item = ProjectionRule> {
        Self::ALL.into_iter().filter(|rule| rule.is_supported())
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionRule::SchoenbergMarsden => "SchoenbergMarsden",
            ProjectionRule::Averaging => "Averaging",
            ProjectionRule::DeBoorFix0 => "DeBoorFix0",
            ProjectionRule::DeBoorFix1 => "DeBoorFix1",
            ProjectionRule::DeBoorFix2 => "DeBoorFix2",
            ProjectionRule::Projection => "Projection",
            ProjectionRule::AveragingTrigonometric => "AveragingTrigonometric",
            ProjectionRule::ProjectionTrigonometric => "ProjectionTrigonometric",
            ProjectionRule::DeBoorFix1Trigonometric => "DeBoorFix1Trigonometric",
            ProjectionRule::DeBoorFix2Trigonometric => "DeBoorFix2Trigonometric",
            ProjectionRule::AveragingHyperbolic => "AveragingHyperbolic",
            ProjectionRule::ProjectionHyperbolic => "ProjectionHyperbolic",
        }
    }

    /// Name of the basis family paired with this rule
    pub fn family_name(&self) -> &'static str {
        self.family().name()
    }

    /// False for rules with no functional
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            ProjectionRule::DeBoorFix1Trigonometric | ProjectionRule::DeBoorFix2Trigonometric
        )
    }

    /// Smallest resolution N the functional is defined for
    pub fn min_grid_points(&self) -> usize {
        match self {
            ProjectionRule::ProjectionTrigonometric | ProjectionRule::ProjectionHyperbolic => {
                projection::MIN_DERIVED_GRID_POINTS
            }
            _ => 1,
        }
    }

    /// Basis family of the rule
    pub fn family(&self) -> Box<dyn BasisFamily> {
        match self {
            ProjectionRule::SchoenbergMarsden
            | ProjectionRule::Averaging
            | ProjectionRule::DeBoorFix0
            | ProjectionRule::DeBoorFix1
            | ProjectionRule::DeBoorFix2
            | ProjectionRule::Projection => Box::new(Algebraic),

            ProjectionRule::AveragingTrigonometric
            | ProjectionRule::ProjectionTrigonometric
            | ProjectionRule::DeBoorFix1Trigonometric
            | ProjectionRule::DeBoorFix2Trigonometric => Box::new(Trigonometric),

            ProjectionRule::AveragingHyperbolic | ProjectionRule::ProjectionHyperbolic => {
                Box::new(Hyperbolic)
            }
        }
    }

    /// Build the basis family and the functional on `grid`
    ///
    /// All weights are computed here, so evaluation afterwards cannot fail.
    ///
    /// # Errors
    ///
    /// - `Configuration`: unsupported rule, degenerate family on this grid,
    ///   resolution too small
    /// - `NumericalInstability`: a derived weight has a near-zero denominator
    pub fn build(&self, grid: &Grid, aux: &AuxiliaryGrid) -> Result<RuleComponents> {
        if !self.is_supported() {
            return Err(self.unsupported());
        }

        let basis = self.family();
        basis.validate(grid)?;

        let functional: Box<dyn ProjectionFunctional> = match self {
            ProjectionRule::SchoenbergMarsden => Box::new(SchoenbergMarsden::new(aux)),
            ProjectionRule::Averaging => Box::new(Averaging::algebraic(grid, aux)),
            ProjectionRule::DeBoorFix0 => Box::new(DeBoorFix::new(DeBoorNode::Zero, grid)),
            ProjectionRule::DeBoorFix1 => Box::new(DeBoorFix::new(DeBoorNode::One, grid)),
            ProjectionRule::DeBoorFix2 => Box::new(DeBoorFix::new(DeBoorNode::Two, grid)),
            ProjectionRule::Projection => Box::new(ExactProjection::algebraic(grid)),
            ProjectionRule::AveragingTrigonometric => Box::new(Averaging::trigonometric(grid, aux)?),
            ProjectionRule::AveragingHyperbolic => Box::new(Averaging::hyperbolic(grid, aux)?),
            ProjectionRule::ProjectionTrigonometric => Box::new(ExactProjection::derived(
                "Trigonometric projection",
                basis.as_ref(),
                grid,
            )?),
            ProjectionRule::ProjectionHyperbolic => Box::new(ExactProjection::derived(
                "Hyperbolic projection",
                basis.as_ref(),
                grid,
            )?),
            ProjectionRule::DeBoorFix1Trigonometric | ProjectionRule::DeBoorFix2Trigonometric => {
                return Err(self.unsupported());
            }
        };

        Ok(RuleComponents { basis, functional })
    }

    fn unsupported(&self) -> FredholmError {
        FredholmError::configuration(format!("Rule {} has no projection functional", self.name()))
    }
}

impl fmt::Display for ProjectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProjectionRule {
    type Err = FredholmError;

    /// Parse a rule from its [`name`](ProjectionRule::name), ignoring case
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FredholmError::configuration(format!("Unknown projection rule '{}'", s)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn setup(n: usize) -> (Grid, AuxiliaryGrid) {
        let grid = Grid::uniform(0.0, FRAC_PI_2, n, 1e-3).unwrap();
        let aux = AuxiliaryGrid::build(&grid);
        (grid, aux)
    }

    #[test]
    fn test_every_supported_rule_builds() {
        let (grid, aux) = setup(15);
        for rule in ProjectionRule::supported() {
            let components = rule.build(&grid, &aux).unwrap();
            assert_eq!(components.basis.name(), rule.family_name());
        }
        assert_eq!(ProjectionRule::supported().count(), 10);
    }

    #[test]
    fn test_unsupported_rules_fail_at_build() {
        let (grid, aux) = setup(15);
        for rule in [
            ProjectionRule::DeBoorFix1Trigonometric,
            ProjectionRule::DeBoorFix2Trigonometric,
        ] {
            assert!(!rule.is_supported());
            let err = rule.build(&grid, &aux).unwrap_err();
            assert!(err.is_configuration());
            assert!(err.to_string().contains(rule.name()));
        }
    }

    #[test]
    fn test_family_pairing() {
        assert_eq!(ProjectionRule::Averaging.family_name(), "Algebraic");
        assert_eq!(ProjectionRule::DeBoorFix0.family_name(), "Algebraic");
        assert_eq!(ProjectionRule::AveragingTrigonometric.family_name(), "Trigonometric");
        assert_eq!(ProjectionRule::DeBoorFix2Trigonometric.family_name(), "Trigonometric");
        assert_eq!(ProjectionRule::ProjectionHyperbolic.family_name(), "Hyperbolic");
    }

    #[test]
    fn test_minimum_grid_points() {
        assert_eq!(ProjectionRule::Projection.min_grid_points(), 1);
        assert_eq!(ProjectionRule::ProjectionTrigonometric.min_grid_points(), 3);
        assert_eq!(ProjectionRule::ProjectionHyperbolic.min_grid_points(), 3);
        assert_eq!(ProjectionRule::Averaging.min_grid_points(), 1);

        let (grid, aux) = setup(2);
        assert!(ProjectionRule::Projection.build(&grid, &aux).is_ok());
        assert!(
            ProjectionRule::ProjectionHyperbolic
                .build(&grid, &aux)
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_single_cell_grid_for_point_rules() {
        let (grid, aux) = setup(1);
        for rule in [
            ProjectionRule::SchoenbergMarsden,
            ProjectionRule::Averaging,
            ProjectionRule::DeBoorFix0,
            ProjectionRule::Projection,
            ProjectionRule::AveragingTrigonometric,
            ProjectionRule::AveragingHyperbolic,
        ] {
            let components = rule.build(&grid, &aux).unwrap();
            for j in grid.basis_indices() {
                assert!(components.functional.evaluate(j, &|x| x).is_finite());
            }
        }
    }

    #[test]
    fn test_display_and_all() {
        assert_eq!(ProjectionRule::ALL.len(), 12);
        assert_eq!(ProjectionRule::Averaging.to_string(), "Averaging");
    }

    #[test]
    fn test_parse_round_trips_names() {
        for rule in ProjectionRule::ALL {
            assert_eq!(rule.name().parse::<ProjectionRule>().unwrap(), rule);
        }
        assert_eq!(" deboorfix1 ".parse::<ProjectionRule>().unwrap(), ProjectionRule::DeBoorFix1);
        assert!("Simpson".parse::<ProjectionRule>().unwrap_err().is_configuration());
    }
}
