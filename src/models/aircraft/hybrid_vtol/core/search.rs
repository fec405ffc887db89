//! Constrained search for the lightest feasible design point.
//!
//! A rectangular grid of wing and power loadings is scanned, each point is
//! converged and checked against every constraint, and the lightest feasible
//! point is optionally refined onto the feasibility boundary by bisection.

mod cache;
mod config;
mod constraint;
mod error;
mod grid;
mod refine;

pub use config::{Axis, RefineConfig, SearchConfig};
pub use constraint::{ConstraintEvaluation, ConstraintKind};
pub use error::SearchError;

use rayon::prelude::*;
use uom::si::{length::meter, mass::kilogram};

use super::{
    AerodynamicConstraints, ConvergenceConfig, ConvergenceError, DesignPoint, MassBreakdown,
    MassConvergence, SearchStats, SizingInputs, SizingResult,
};

use cache::EvaluationCache;
use constraint::wingspan;
use grid::Grid;

/// A design point together with its converged mass and constraint margins.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub point: DesignPoint,

    /// Converged mass budget, or why the mass loop failed.
    pub breakdown: Result<MassBreakdown, ConvergenceError>,

    /// Wingspan of the converged design, m.
    pub wingspan: Option<f64>,

    /// Margins for every constraint that could be evaluated.
    ///
    /// Geometric constraints need a converged mass and are missing when the
    /// mass loop failed.
    pub constraints: Vec<ConstraintEvaluation>,
}

impl Evaluation {
    /// Converged take-off mass in kg.
    #[must_use]
    pub fn take_off_mass(&self) -> Option<f64> {
        self.breakdown.as_ref().ok().map(MassBreakdown::take_off_kg)
    }

    /// Whether the mass converged and every margin is at least `-epsilon`.
    #[must_use]
    pub fn is_feasible(&self, epsilon: f64) -> bool {
        self.breakdown.is_ok() && self.constraints.iter().all(|c| c.is_satisfied(epsilon))
    }

    /// The constraint with the smallest margin.
    ///
    /// A failed mass loop is reported as [`ConstraintKind::MassClosure`] with
    /// a margin of negative infinity. NaN margins rank as negative infinity.
    #[must_use]
    pub fn limiting(&self) -> ConstraintEvaluation {
        if self.breakdown.is_err() {
            return ConstraintEvaluation {
                kind: ConstraintKind::MassClosure,
                margin: f64::NEG_INFINITY,
            };
        }
        self.constraints
            .iter()
            .map(|c| ConstraintEvaluation {
                margin: if c.margin.is_nan() {
                    f64::NEG_INFINITY
                } else {
                    c.margin
                },
                ..*c
            })
            .min_by(|a, b| a.margin.total_cmp(&b.margin))
            .unwrap_or(ConstraintEvaluation {
                kind: ConstraintKind::MassClosure,
                margin: f64::NEG_INFINITY,
            })
    }

    /// Negated smallest margin. Positive means infeasible.
    #[must_use]
    pub fn violation(&self) -> f64 {
        -self.limiting().margin
    }
}

/// Grid scan plus boundary refinement over one set of inputs.
///
/// Evaluations are cached for the lifetime of the search, so repeated
/// queries of the same point are free.
#[derive(Debug)]
pub struct FeasibleDesignSearch<'a> {
    inputs: &'a SizingInputs,
    convergence: ConvergenceConfig,
    config: &'a SearchConfig,
    cache: EvaluationCache,
}

impl<'a> FeasibleDesignSearch<'a> {
    #[must_use]
    pub fn new(
        inputs: &'a SizingInputs,
        convergence: ConvergenceConfig,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            inputs,
            convergence,
            config,
            cache: EvaluationCache::default(),
        }
    }

    /// Converges `point` and computes its constraint margins.
    ///
    /// Convergence failures are recorded on the evaluation, not returned.
    pub fn evaluate(&self, point: DesignPoint) -> Evaluation {
        self.cache
            .get_or_evaluate(point, || self.evaluate_uncached(point))
    }

    /// Scans the grid and returns the lightest feasible design.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Domain`] for invalid axes, or
    /// [`SearchError::InfeasibleDesignSpace`] if no grid point is feasible.
    pub fn run(&self) -> Result<SizingResult, SearchError> {
        let grid = Grid::new(self.config)?;
        let points = grid.points();

        let evaluations: Vec<Evaluation> = if self.config.parallel {
            points
                .par_iter()
                .map(|&point| self.evaluate(point))
                .collect()
        } else {
            points.iter().map(|&point| self.evaluate(point)).collect()
        };

        let epsilon = self.config.epsilon;
        let feasible_points = evaluations
            .iter()
            .filter(|e| e.is_feasible(epsilon))
            .count();
        log::debug!(
            "grid scan: {feasible_points} of {} points feasible",
            points.len()
        );

        let Some(best) = select_best(&evaluations, epsilon, self.config.tie_tolerance) else {
            return Err(infeasible(&evaluations));
        };

        let mut best = best.clone();
        let mut refined = false;
        if let Some(refine_config) = &self.config.refine {
            if let Some(better) = refine::refine(self, &grid, &best, refine_config) {
                log::debug!(
                    "refined {:?} to {:?}, {:.4} kg -> {:.4} kg",
                    best.point,
                    better.point,
                    best.take_off_mass().unwrap_or(f64::NAN),
                    better.take_off_mass().unwrap_or(f64::NAN),
                );
                best = better;
                refined = true;
            }
        }

        let stats = SearchStats {
            grid_points: points.len(),
            feasible_points,
            evaluations: self.cache.len(),
            cache_hits: self.cache.hits(),
            refined,
        };

        match best {
            Evaluation {
                point,
                breakdown: Ok(breakdown),
                wingspan: Some(span),
                constraints,
            } => {
                for flag in &breakdown.extrapolations {
                    log::warn!("selected design extrapolates a rotor regression: {flag}");
                }
                Ok(SizingResult::new(point, span, breakdown, constraints, stats))
            }
            other => Err(infeasible(std::slice::from_ref(&other))),
        }
    }

    pub(crate) fn aerodynamics(&self) -> AerodynamicConstraints<'a> {
        AerodynamicConstraints::new(
            &self.inputs.constants,
            &self.inputs.aerodynamics,
            &self.inputs.mission,
        )
    }

    pub(crate) fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    fn evaluate_uncached(&self, point: DesignPoint) -> Evaluation {
        let inputs = self.inputs;
        let wing_loading = point.wing_loading();
        let power_loading = point.power_loading();
        let aero = self.aerodynamics();

        let mut constraints = vec![ConstraintEvaluation::upper(
            ConstraintKind::Stall,
            aero.stall_wing_loading(),
            wing_loading,
        )];

        let required = match aero.required_power_loading(wing_loading) {
            Ok(required) => required,
            Err(error) => {
                return Evaluation {
                    point,
                    breakdown: Err(error.into()),
                    wingspan: None,
                    constraints,
                };
            }
        };
        constraints.extend([
            ConstraintEvaluation::lower(
                ConstraintKind::CruisePower,
                required.cruise,
                power_loading,
            ),
            ConstraintEvaluation::lower(ConstraintKind::ClimbPower, required.climb, power_loading),
            ConstraintEvaluation::lower(
                ConstraintKind::CeilingPower,
                required.ceiling,
                power_loading,
            ),
        ]);

        let breakdown = MassConvergence::new(inputs, self.convergence).solve(point);
        let span = breakdown.as_ref().ok().map(|breakdown| {
            let weight = breakdown.take_off_mass.get::<kilogram>() * inputs.constants.g();
            let span = wingspan(inputs.aerodynamics.aspect_ratio.get(), weight, wing_loading);

            let limits = &inputs.limits;
            let propulsion = &breakdown.propulsion;
            constraints.extend([
                ConstraintEvaluation::upper(ConstraintKind::Wingspan, limits.span_m(), span),
                ConstraintEvaluation::upper(
                    ConstraintKind::CruisePropellerDiameter,
                    limits.diameter_m(),
                    propulsion.cruise_propeller_diameter.get::<meter>(),
                ),
                ConstraintEvaluation::upper(
                    ConstraintKind::VtolPropellerDiameter,
                    limits.diameter_m(),
                    propulsion.vtol_propeller_diameter.get::<meter>(),
                ),
            ]);
            span
        });

        Evaluation {
            point,
            breakdown,
            wingspan: span,
            constraints,
        }
    }
}

/// Picks the lightest feasible evaluation.
///
/// Evaluations within `tie_tolerance` (relative) of the lightest mass tie;
/// ties go to the lowest wing loading, then the lowest power loading, so the
/// choice does not depend on evaluation order.
#[must_use]
pub fn select_best(
    evaluations: &[Evaluation],
    epsilon: f64,
    tie_tolerance: f64,
) -> Option<&Evaluation> {
    let feasible: Vec<(&Evaluation, f64)> = evaluations
        .iter()
        .filter(|e| e.is_feasible(epsilon))
        .filter_map(|e| e.take_off_mass().map(|mass| (e, mass)))
        .collect();

    let lightest = feasible
        .iter()
        .map(|&(_, mass)| mass)
        .min_by(f64::total_cmp)?;
    let cutoff = lightest * (1.0 + tie_tolerance);

    feasible
        .into_iter()
        .filter(|&(_, mass)| mass <= cutoff)
        .map(|(e, _)| e)
        .min_by(|a, b| by_loadings(a.point, b.point))
}

/// The evaluation closest to feasibility.
fn least_infeasible(evaluations: &[Evaluation]) -> Option<&Evaluation> {
    evaluations.iter().min_by(|a, b| {
        a.violation()
            .total_cmp(&b.violation())
            .then_with(|| by_loadings(a.point, b.point))
    })
}

fn infeasible(evaluations: &[Evaluation]) -> SearchError {
    let closest = least_infeasible(evaluations);
    let limiting = closest.map_or(
        ConstraintEvaluation {
            kind: ConstraintKind::MassClosure,
            margin: f64::NEG_INFINITY,
        },
        Evaluation::limiting,
    );
    if let Some(closest) = closest {
        log::debug!(
            "no feasible design; closest is {:?} limited by {}",
            closest.point,
            limiting.kind
        );
    }
    SearchError::InfeasibleDesignSpace {
        constraint: limiting.kind,
        margin: limiting.margin,
    }
}

fn by_loadings(a: DesignPoint, b: DesignPoint) -> std::cmp::Ordering {
    a.wing_loading()
        .total_cmp(&b.wing_loading())
        .then_with(|| a.power_loading().total_cmp(&b.power_loading()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        available_energy::joule_per_kilogram,
        f64::{AvailableEnergy, Length, Mass},
    };

    use crate::models::aircraft::hybrid_vtol::core::test_support::reference_inputs;
    use crate::support::constraint::Constrained;

    fn point(wing_loading: f64, power_loading: f64) -> DesignPoint {
        DesignPoint::new(wing_loading, power_loading).unwrap()
    }

    fn sequential() -> SearchConfig {
        SearchConfig {
            parallel: false,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn reference_search_finds_light_feasible_design() {
        let inputs = reference_inputs();
        let config = SearchConfig::default();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);
        let result = search.run().unwrap();

        let mass = result.take_off_mass.get::<kilogram>();
        assert!((10.0..12.5).contains(&mass), "mass = {mass}");

        let stall = search.aerodynamics().stall_wing_loading();
        assert!(result.design.wing_loading() <= stall);
        assert!((90.0..=stall).contains(&result.design.wing_loading()));
        assert!((4.0..6.0).contains(&result.design.power_loading()));

        assert!(result.constraints.iter().all(|c| c.is_satisfied(0.0)));
        assert_eq!(result.constraints.len(), 7);
        assert_eq!(result.stats.grid_points, 37 * 47);
        assert!(result.stats.feasible_points > 0);
        assert!(result.wingspan.get::<meter>() < 4.0);
    }

    #[test]
    fn refinement_never_makes_things_worse() {
        let inputs = reference_inputs();
        let coarse = SearchConfig {
            refine: None,
            ..sequential()
        };
        let grid_only = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &coarse)
            .run()
            .unwrap();

        let config = sequential();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);
        let refined = search.run().unwrap();

        assert!(refined.take_off_mass <= grid_only.take_off_mass);
        assert!(search.evaluate(refined.design).is_feasible(0.0));
        assert!(!grid_only.stats.refined);
    }

    #[test]
    fn parallel_and_sequential_scans_agree() {
        let inputs = reference_inputs();
        let parallel = SearchConfig::default();
        let sequential = sequential();

        let a = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &parallel)
            .run()
            .unwrap();
        let b = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &sequential)
            .run()
            .unwrap();

        assert_eq!(a.design, b.design);
        assert_eq!(a.take_off_mass, b.take_off_mass);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn stall_limit_ignores_power_loading() {
        let inputs = reference_inputs();
        let config = sequential();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);

        let margin = |e: &Evaluation| {
            e.constraints
                .iter()
                .find(|c| c.kind == ConstraintKind::Stall)
                .map(|c| c.margin)
                .unwrap()
        };
        let low = search.evaluate(point(120.0, 5.0));
        let high = search.evaluate(point(120.0, 20.0));
        assert_eq!(margin(&low), margin(&high));

        let too_fast = search.evaluate(point(217.0, 10.0));
        assert!(!too_fast.is_feasible(0.0));
        assert_eq!(too_fast.limiting().kind, ConstraintKind::Stall);
    }

    #[test]
    fn ties_go_to_lower_loadings() {
        let inputs = reference_inputs();
        let config = sequential();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);

        let mut evaluations: Vec<Evaluation> = [(100.0, 6.0), (90.0, 6.0), (90.0, 5.5)]
            .into_iter()
            .map(|(ws, pl)| search.evaluate(point(ws, pl)))
            .collect();
        assert!(evaluations.iter().all(|e| e.is_feasible(0.0)));

        for e in &mut evaluations {
            if let Ok(breakdown) = &mut e.breakdown {
                breakdown.take_off_mass = Mass::new::<kilogram>(11.0);
            }
        }
        let best = select_best(&evaluations, 0.0, 1e-9).unwrap();
        assert_eq!(best.point, point(90.0, 5.5));

        if let Ok(breakdown) = &mut evaluations[0].breakdown {
            breakdown.take_off_mass = Mass::new::<kilogram>(10.9);
        }
        let best = select_best(&evaluations, 0.0, 1e-9).unwrap();
        assert_eq!(best.point, point(100.0, 6.0));
    }

    #[test]
    fn infeasible_space_names_the_binding_constraint() {
        let mut inputs = reference_inputs();
        inputs.limits.max_wingspan = Constrained::new(Length::new::<meter>(0.5)).unwrap();

        let config = sequential();
        let err = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config)
            .run()
            .unwrap_err();

        match err {
            SearchError::InfeasibleDesignSpace { constraint, margin } => {
                assert_eq!(constraint, ConstraintKind::Wingspan);
                assert!(margin < 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn diverged_points_are_skipped_not_fatal() {
        let mut inputs = reference_inputs();
        inputs.battery.specific_energy =
            Constrained::new(AvailableEnergy::new::<joule_per_kilogram>(120.0 * 3600.0)).unwrap();
        inputs.limits.max_wingspan = Constrained::new(Length::new::<meter>(20.0)).unwrap();
        inputs.limits.max_propeller_diameter = Constrained::new(Length::new::<meter>(2.0)).unwrap();

        let config = sequential();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);
        let result = search.run().unwrap();

        let failed = Grid::new(&config)
            .unwrap()
            .points()
            .into_iter()
            .filter(|&p| search.evaluate(p).breakdown.is_err())
            .count();
        assert!(failed > 0);
        assert!(result.stats.feasible_points + failed <= result.stats.grid_points);
        assert!(result.constraints.iter().all(|c| c.is_satisfied(0.0)));
        assert!(search.evaluate(result.design).breakdown.is_ok());
    }

    #[test]
    fn invalid_axis_is_a_domain_error() {
        let inputs = reference_inputs();
        let config = SearchConfig {
            power_loading: Axis::new(5.0, 2.0, 10),
            ..sequential()
        };

        assert!(matches!(
            FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config).run(),
            Err(SearchError::Domain(_))
        ));
    }

    #[test]
    fn repeated_points_hit_the_cache() {
        let inputs = reference_inputs();
        let config = sequential();
        let search = FeasibleDesignSearch::new(&inputs, ConvergenceConfig::default(), &config);

        let first = search.evaluate(point(110.0, 5.0));
        let second = search.evaluate(point(110.0, 5.0));
        assert_eq!(first, second);
        assert_eq!(search.cache.len(), 1);
        assert_eq!(search.cache.hits(), 1);
    }
}
