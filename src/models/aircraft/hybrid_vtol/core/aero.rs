//! Performance constraints of the fixed-wing airframe.
//!
//! All power loadings assume a parabolic drag polar `CD = CD0 + k·CL²` at the
//! design air density and are converted from thrust loading through the
//! cruise propeller efficiency.

use super::{
    AerodynamicsInput, DomainError, MissionInput, PhysicalConstants, error::positive_finite,
};

/// Stall limit and required power loadings for a given wing loading.
#[derive(Debug, Clone, Copy)]
pub struct AerodynamicConstraints<'a> {
    constants: &'a PhysicalConstants,
    aero: &'a AerodynamicsInput,
    mission: &'a MissionInput,
}

/// Power loadings (W/N) required by each performance constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredPowerLoading {
    pub cruise: f64,
    pub climb: f64,
    pub ceiling: f64,
}

impl RequiredPowerLoading {
    /// The most demanding requirement.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.cruise.max(self.climb).max(self.ceiling)
    }
}

/// One sample of the constraint diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramRow {
    pub wing_loading: f64,
    pub required: RequiredPowerLoading,
    pub stall_limited: bool,
}

impl<'a> AerodynamicConstraints<'a> {
    #[must_use]
    pub fn new(
        constants: &'a PhysicalConstants,
        aero: &'a AerodynamicsInput,
        mission: &'a MissionInput,
    ) -> Self {
        Self {
            constants,
            aero,
            mission,
        }
    }

    /// Maximum wing loading that still meets the stall speed, N/m².
    ///
    /// `0.5 · ρ · V_stall² · CL_max`
    #[must_use]
    pub fn stall_wing_loading(&self) -> f64 {
        0.5 * self.constants.rho()
            * self.mission.v_stall().powi(2)
            * self.aero.max_lift_coefficient.get()
    }

    /// Power loading needed for level flight at cruise speed, W/N.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn cruise_power_loading(&self, wing_loading: f64) -> Result<f64, DomainError> {
        let wing_loading = check_wing_loading(wing_loading)?;
        let v = self.mission.v_cruise();
        let thrust_to_weight = self.thrust_to_weight(v, wing_loading);
        Ok(thrust_to_weight * v / self.aero.propeller_efficiency.get())
    }

    /// Power loading needed to climb at `rate_of_climb` (m/s), W/N.
    ///
    /// The climb is flown at the speed for best rate of climb,
    /// `V = sqrt(2/ρ · W/S · sqrt(k / (3·CD0)))`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn climb_power_loading(
        &self,
        wing_loading: f64,
        rate_of_climb: f64,
    ) -> Result<f64, DomainError> {
        let wing_loading = check_wing_loading(wing_loading)?;
        let v = self.best_climb_speed(wing_loading);
        let thrust_to_weight = rate_of_climb / v + self.thrust_to_weight(v, wing_loading);
        Ok(thrust_to_weight * v / self.aero.propeller_efficiency.get())
    }

    /// Power loading for the cruise-climb requirement.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn cruise_climb_power_loading(&self, wing_loading: f64) -> Result<f64, DomainError> {
        self.climb_power_loading(wing_loading, self.mission.rate_of_climb())
    }

    /// Power loading for the residual climb rate at the service ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn ceiling_power_loading(&self, wing_loading: f64) -> Result<f64, DomainError> {
        self.climb_power_loading(wing_loading, self.mission.ceiling_rate_of_climb())
    }

    /// All required power loadings at once.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn required_power_loading(
        &self,
        wing_loading: f64,
    ) -> Result<RequiredPowerLoading, DomainError> {
        Ok(RequiredPowerLoading {
            cruise: self.cruise_power_loading(wing_loading)?,
            climb: self.cruise_climb_power_loading(wing_loading)?,
            ceiling: self.ceiling_power_loading(wing_loading)?,
        })
    }

    /// Samples the constraint diagram over the given wing loadings.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] on the first non-positive wing loading.
    pub fn constraint_diagram(
        &self,
        wing_loadings: impl IntoIterator<Item = f64>,
    ) -> Result<Vec<DiagramRow>, DomainError> {
        let stall = self.stall_wing_loading();
        wing_loadings
            .into_iter()
            .map(|wing_loading| {
                Ok(DiagramRow {
                    wing_loading,
                    required: self.required_power_loading(wing_loading)?,
                    stall_limited: wing_loading > stall,
                })
            })
            .collect()
    }

    /// Level-flight thrust-to-weight at speed `v`: `q·CD0/(W/S) + k/q·(W/S)`.
    fn thrust_to_weight(&self, v: f64, wing_loading: f64) -> f64 {
        let q = 0.5 * self.constants.rho() * v * v;
        let k = self.aero.induced_drag_factor();
        q * self.aero.zero_lift_drag.get() / wing_loading + k / q * wing_loading
    }

    fn best_climb_speed(&self, wing_loading: f64) -> f64 {
        let k = self.aero.induced_drag_factor();
        let cd0 = self.aero.zero_lift_drag.get();
        (2.0 / self.constants.rho() * wing_loading * (k / (3.0 * cd0)).sqrt()).sqrt()
    }
}

fn check_wing_loading(wing_loading: f64) -> Result<f64, DomainError> {
    positive_finite(wing_loading).ok_or(DomainError::WingLoading(wing_loading))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    use crate::models::aircraft::hybrid_vtol::core::test_support::reference_inputs;

    #[test]
    fn stall_wing_loading_matches_closed_form() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        assert_relative_eq!(
            aero.stall_wing_loading(),
            0.5 * 0.9013 * 13.8 * 13.8 * 1.34,
            max_relative = 1e-12
        );
    }

    #[test]
    fn cruise_power_loading_from_drag_polar() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        let ws = 100.0;
        let q = 0.5 * 0.9013 * 25.0 * 25.0;
        let k = 1.0 / (PI * 0.8 * 10.0);
        let t_w = q * 0.03 / ws + k / q * ws;

        assert_relative_eq!(
            aero.cruise_power_loading(ws).unwrap(),
            t_w * 25.0 / 0.7,
            max_relative = 1e-12
        );
    }

    #[test]
    fn climb_needs_more_power_than_ceiling() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        let required = aero.required_power_loading(110.0).unwrap();
        assert!(required.climb > required.ceiling);
        assert_relative_eq!(required.max(), required.climb);
    }

    #[test]
    fn climb_at_zero_rate_is_level_flight_at_best_climb_speed() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        let level = aero.climb_power_loading(80.0, 0.0).unwrap();
        let climbing = aero.climb_power_loading(80.0, 2.5).unwrap();
        assert!(level > 0.0);
        assert_relative_eq!(climbing - level, 2.5 / 0.7, max_relative = 1e-12);
    }

    #[test]
    fn non_positive_wing_loading_is_a_domain_error() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        assert_eq!(
            aero.cruise_power_loading(0.0),
            Err(DomainError::WingLoading(0.0))
        );
        assert!(aero.climb_power_loading(-10.0, 1.0).is_err());
    }

    #[test]
    fn diagram_marks_stall_limited_samples() {
        let inputs = reference_inputs();
        let aero =
            AerodynamicConstraints::new(&inputs.constants, &inputs.aerodynamics, &inputs.mission);

        let rows = aero.constraint_diagram([50.0, 100.0, 150.0]).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(!rows[1].stall_limited);
        assert!(rows[2].stall_limited);
    }
}
