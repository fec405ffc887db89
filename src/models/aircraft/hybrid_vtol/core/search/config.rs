use twine_solvers::equation::bisection;

use crate::models::aircraft::hybrid_vtol::core::DomainError;

/// One design-variable axis of the search grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub lower: f64,
    pub upper: f64,

    /// Evenly spaced samples, both bounds included.
    pub points: usize,
}

impl Axis {
    #[must_use]
    pub fn new(lower: f64, upper: f64, points: usize) -> Self {
        Self {
            lower,
            upper,
            points,
        }
    }

    /// Evenly spaced samples from `lower` to `upper`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Bounds`] unless `0 < lower < upper`, both are
    /// finite, and there are at least two points.
    pub(crate) fn values(&self, axis: &'static str) -> Result<Vec<f64>, DomainError> {
        let Self {
            lower,
            upper,
            points,
        } = *self;
        let valid = lower.is_finite() && upper.is_finite() && lower > 0.0 && upper > lower;
        if !valid || points < 2 {
            return Err(DomainError::Bounds {
                axis,
                lower,
                upper,
                points,
            });
        }

        let step = (upper - lower) / (points - 1) as f64;
        Ok((0..points)
            .map(|i| if i == points - 1 { upper } else { lower + step * i as f64 })
            .collect())
    }
}

/// Settings for the constrained design search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Wing loading axis, N/m².
    pub wing_loading: Axis,

    /// Power loading axis, W/N.
    pub power_loading: Axis,

    /// A constraint is met when its normalised margin is at least `-epsilon`.
    pub epsilon: f64,

    /// Relative mass difference under which two designs tie.
    ///
    /// Ties go to the lower wing loading, then the lower power loading.
    pub tie_tolerance: f64,

    /// Evaluate grid points on the rayon thread pool.
    pub parallel: bool,

    /// Boundary refinement after the grid scan, skipped when `None`.
    pub refine: Option<RefineConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            wing_loading: Axis::new(20.0, 200.0, 37),
            power_loading: Axis::new(2.0, 25.0, 47),
            epsilon: 0.0,
            tie_tolerance: 1e-9,
            parallel: true,
            refine: Some(RefineConfig::default()),
        }
    }
}

impl SearchConfig {
    /// Checks both axes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Bounds`] for the first invalid axis.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.wing_loading.values("wing_loading")?;
        self.power_loading.values("power_loading")?;
        Ok(())
    }
}

/// Solver configuration for the feasibility-boundary bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineConfig {
    /// Maximum iteration count for each bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on wing loading, N/m².
    pub wing_loading_tol: f64,

    /// Absolute tolerance on the margin residual.
    pub residual_tol: f64,

    /// Margin the boundary point is placed at, keeping it just inside the
    /// feasible region.
    pub margin_target: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_iters: 60,
            wing_loading_tol: 1e-9,
            residual_tol: 1e-12,
            margin_target: 1e-6,
        }
    }
}

impl RefineConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.wing_loading_tol,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_axes() {
        let config = SearchConfig::default();
        let ws = config.wing_loading.values("wing_loading").unwrap();
        let pl = config.power_loading.values("power_loading").unwrap();

        assert_eq!(ws.len(), 37);
        assert_eq!(pl.len(), 47);
        assert_relative_eq!(ws[1] - ws[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(pl[1] - pl[0], 0.5, epsilon = 1e-12);
        assert_eq!(ws[36], 200.0);
        assert_eq!(pl[46], 25.0);
    }

    #[test]
    fn rejects_bad_axes() {
        assert!(Axis::new(0.0, 10.0, 5).values("wing_loading").is_err());
        assert!(Axis::new(10.0, 5.0, 5).values("wing_loading").is_err());
        assert_eq!(
            Axis::new(1.0, 5.0, 1).values("power_loading"),
            Err(DomainError::Bounds {
                axis: "power_loading",
                lower: 1.0,
                upper: 5.0,
                points: 1,
            })
        );
    }
}
