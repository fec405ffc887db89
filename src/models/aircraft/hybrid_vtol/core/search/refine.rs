//! Refinement of the best grid point onto the feasibility boundary.
//!
//! Grid spacing leaves the optimum between samples. Starting from the best
//! grid point, bisection along wing loading finds where each infeasible
//! neighbour's binding constraint becomes active, then power loading is
//! lowered to the largest aerodynamic requirement at that wing loading.

mod problem;

use twine_solvers::equation::bisection;

use crate::models::aircraft::hybrid_vtol::core::DesignPoint;

use super::{Evaluation, FeasibleDesignSearch, RefineConfig, grid::Grid};

use problem::{BoundaryModel, BoundaryProblem};

/// Returns a feasible design lighter than `best`, if refinement finds one.
pub(super) fn refine(
    search: &FeasibleDesignSearch<'_>,
    grid: &Grid,
    best: &Evaluation,
    config: &RefineConfig,
) -> Option<Evaluation> {
    let best_mass = best.take_off_mass()?;
    let epsilon = search.epsilon();

    let mut candidates = vec![snap(search, grid, best.point)];
    for neighbor in grid.wing_loading_neighbors(best.point.wing_loading()) {
        let point = best.point.with_wing_loading(neighbor);
        if search.evaluate(point).is_feasible(epsilon) {
            continue;
        }
        if let Some(boundary) = boundary(search, best, point, config) {
            candidates.push(snap(search, grid, boundary.point));
        }
    }

    candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.is_feasible(epsilon))
        .filter_map(|candidate| {
            let mass = candidate.take_off_mass()?;
            (mass < best_mass).then_some((candidate, mass))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}

/// Evaluates `point` with power loading lowered to the aerodynamic requirement.
fn snap(search: &FeasibleDesignSearch<'_>, grid: &Grid, point: DesignPoint) -> Option<Evaluation> {
    let required = search
        .aerodynamics()
        .required_power_loading(point.wing_loading())
        .ok()?
        .max();
    let power_loading = required.max(grid.min_power_loading());
    Some(search.evaluate(point.with_power_loading(power_loading)))
}

/// Bisects wing loading between a feasible evaluation and an infeasible point.
fn boundary(
    search: &FeasibleDesignSearch<'_>,
    feasible: &Evaluation,
    infeasible: DesignPoint,
    config: &RefineConfig,
) -> Option<Evaluation> {
    let model = BoundaryModel::new(search);
    let problem = BoundaryProblem::new(feasible.point.power_loading(), config.margin_target);

    // Both ends must straddle the target margin.
    let inside = problem.residual(feasible);
    let outside = problem.residual(&search.evaluate(infeasible));
    if !(inside < 0.0 && outside > 0.0) {
        return None;
    }

    let solution = bisection::solve(
        &model,
        &problem,
        [feasible.point.wing_loading(), infeasible.wing_loading()],
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| None,
    );

    match solution {
        Ok(solution) if solution.status == bisection::Status::Converged => {
            log::trace!(
                "feasibility boundary at {:?} after {} iterations",
                solution.snapshot.output.point,
                solution.iters
            );
            Some(solution.snapshot.output)
        }
        Ok(solution) => {
            log::debug!(
                "boundary bisection hit iteration limit: residual={}",
                solution.residual
            );
            None
        }
        Err(error) => {
            log::debug!("boundary bisection failed: {error}");
            None
        }
    }
}
