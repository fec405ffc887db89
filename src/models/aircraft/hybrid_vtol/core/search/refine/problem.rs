//! Problem formulation for locating the feasibility boundary.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use crate::models::aircraft::hybrid_vtol::core::DesignPoint;

use super::super::{Evaluation, FeasibleDesignSearch};

/// Residual assigned to points whose mass loop failed.
///
/// Large and positive, so bisection treats them as deeply infeasible.
const FAILED_RESIDUAL: f64 = 1e6;

/// Model adapter exposing cached design-point evaluation.
pub(super) struct BoundaryModel<'a, 'b> {
    search: &'a FeasibleDesignSearch<'b>,
}

impl<'a, 'b> BoundaryModel<'a, 'b> {
    pub(super) fn new(search: &'a FeasibleDesignSearch<'b>) -> Self {
        Self { search }
    }
}

impl Model for BoundaryModel<'_, '_> {
    type Input = DesignPoint;
    type Output = Evaluation;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.search.evaluate(*input))
    }
}

/// Equation problem along wing loading at fixed power loading.
///
/// The residual is `margin_target - min_margin`: negative inside the
/// feasible region and zero just inside its boundary.
pub(super) struct BoundaryProblem {
    power_loading: f64,
    margin_target: f64,
}

impl BoundaryProblem {
    pub(super) fn new(power_loading: f64, margin_target: f64) -> Self {
        Self {
            power_loading,
            margin_target,
        }
    }

    pub(super) fn residual(&self, evaluation: &Evaluation) -> f64 {
        (evaluation.violation() + self.margin_target).min(FAILED_RESIDUAL)
    }
}

impl EquationProblem<1> for BoundaryProblem {
    type Input = DesignPoint;
    type Output = Evaluation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(DesignPoint::new_unchecked(x[0], self.power_loading))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}
