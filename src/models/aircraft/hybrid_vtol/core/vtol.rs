//! Lift-rotor sizing from momentum theory and empirical rotor regressions.

use std::f64::consts::PI;

use super::{DomainError, Extrapolation, PhysicalConstants, VtolInput, error::positive_finite};

/// Installed thrust margin over the weight-plus-download requirement.
const THRUST_MARGIN: f64 = 1.2;

/// Lift-rotor requirements for one take-off mass and wing loading.
#[derive(Debug, Clone, Copy)]
pub struct VtolPropulsion<'a> {
    constants: &'a PhysicalConstants,
    vtol: &'a VtolInput,
    wing_loading: f64,
    take_off_mass: f64,
}

/// Output of [`VtolPropulsion::power_required`].
#[derive(Debug, Clone, PartialEq)]
pub struct VtolPower {
    /// Shaft power for the vertical climb, W. This sizes the VTOL motors.
    pub climb_power: f64,

    /// Shaft power to hover at full installed thrust, W.
    pub hover_power: f64,

    /// Total rotor disc area, m².
    pub disc_area: f64,

    /// Disc loading, N/m².
    pub disc_loading: f64,

    /// Total installed VTOL thrust, N.
    pub thrust: f64,

    /// Installed thrust over take-off weight.
    pub thrust_to_weight: f64,

    pub figure_of_merit: f64,

    /// Hover induced velocity, m/s.
    pub hover_induced_velocity: f64,

    /// Induced velocity during the vertical climb, m/s.
    pub climb_induced_velocity: f64,

    /// Diameter of one lift rotor, m.
    pub rotor_diameter: f64,

    /// Regressions evaluated outside their fitted range.
    pub extrapolations: Vec<Extrapolation>,
}

impl<'a> VtolPropulsion<'a> {
    /// # Errors
    ///
    /// Returns a [`DomainError`] if wing loading or take-off mass is not
    /// strictly positive and finite.
    pub fn new(
        constants: &'a PhysicalConstants,
        vtol: &'a VtolInput,
        wing_loading: f64,
        take_off_mass: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            constants,
            vtol,
            wing_loading: positive_finite(wing_loading)
                .ok_or(DomainError::WingLoading(wing_loading))?,
            take_off_mass: positive_finite(take_off_mass)
                .ok_or(DomainError::TakeOffMass(take_off_mass))?,
        })
    }

    /// `1.2 · (1 + ρ · ROC² · S_ratio / (W/S))`
    ///
    /// The second term is the download of the climb airflow on the wing area
    /// under the rotors.
    #[must_use]
    pub fn thrust_to_weight(&self) -> f64 {
        let rho = self.constants.rho();
        let roc = self.vtol.roc();
        THRUST_MARGIN
            * (1.0 + rho * roc * roc * self.vtol.projected_area_ratio.get() / self.wing_loading)
    }

    /// Take-off weight, N.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.take_off_mass * self.constants.g()
    }

    /// Sizes the lift rotors and their power.
    #[must_use]
    pub fn power_required(&self) -> VtolPower {
        let rho = self.constants.rho();
        let regressions = &self.constants.regressions;
        let rotors = self.vtol.rotors();
        let roc = self.vtol.roc();

        let thrust_to_weight = self.thrust_to_weight();
        let thrust = thrust_to_weight * self.weight();

        let (figure_of_merit, fm_flag) = regressions.figure_of_merit.eval(thrust / rotors);
        let (disc_loading, dl_flag) = regressions.disc_loading.eval(self.take_off_mass);
        let extrapolations: Vec<_> = fm_flag.into_iter().chain(dl_flag).collect();
        for flag in &extrapolations {
            log::trace!("rotor regression extrapolated: {flag}");
        }

        let disc_area = thrust / disc_loading;
        let rotor_diameter = (4.0 * disc_area / (rotors * PI)).sqrt();

        let v_h = (disc_loading / (2.0 * rho)).sqrt();
        let x = roc / (2.0 * v_h);
        let v_i = v_h * (-x + (x * x + 1.0).sqrt());

        VtolPower {
            climb_power: thrust * (roc + v_i) / figure_of_merit,
            hover_power: thrust * v_h / figure_of_merit,
            disc_area,
            disc_loading,
            thrust,
            thrust_to_weight,
            figure_of_merit,
            hover_induced_velocity: v_h,
            climb_induced_velocity: v_i,
            rotor_diameter,
            extrapolations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::aircraft::hybrid_vtol::core::test_support::reference_inputs;

    #[test]
    fn thrust_to_weight_includes_download() {
        let inputs = reference_inputs();
        let model = VtolPropulsion::new(&inputs.constants, &inputs.vtol, 100.0, 12.0).unwrap();

        assert_relative_eq!(
            model.thrust_to_weight(),
            1.2 * (1.0 + 0.9013 * 2.0 * 2.0 * 1.0 / 100.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn momentum_theory_power() {
        let inputs = reference_inputs();
        let model = VtolPropulsion::new(&inputs.constants, &inputs.vtol, 100.0, 12.0).unwrap();
        let power = model.power_required();

        let thrust = model.thrust_to_weight() * 12.0 * 9.81;
        let fm = 0.4742 * (thrust / 4.0).powf(0.0793);
        let dl: f64 = 3.2261 * 12.0 + 74.991;
        let v_h = (dl / (2.0 * 0.9013)).sqrt();

        assert_relative_eq!(power.thrust, thrust, max_relative = 1e-12);
        assert_relative_eq!(power.figure_of_merit, fm, max_relative = 1e-12);
        assert_relative_eq!(power.disc_area, thrust / dl, max_relative = 1e-12);
        assert_relative_eq!(power.hover_power, thrust * v_h / fm, max_relative = 1e-12);

        // Climbing reduces induced velocity but always costs more than hovering.
        assert!(power.climb_induced_velocity < power.hover_induced_velocity);
        assert!(power.climb_power > power.hover_power);
        assert!(power.extrapolations.is_empty());
    }

    #[test]
    fn rotor_diameter_shares_disc_area() {
        let inputs = reference_inputs();
        let power = VtolPropulsion::new(&inputs.constants, &inputs.vtol, 100.0, 12.0)
            .unwrap()
            .power_required();

        let per_rotor = PI * power.rotor_diameter.powi(2) / 4.0;
        assert_relative_eq!(per_rotor * 4.0, power.disc_area, max_relative = 1e-12);
    }

    #[test]
    fn heavy_aircraft_flag_regressions() {
        let inputs = reference_inputs();
        let power = VtolPropulsion::new(&inputs.constants, &inputs.vtol, 100.0, 40.0)
            .unwrap()
            .power_required();

        assert!(
            power
                .extrapolations
                .iter()
                .any(|e| matches!(e, Extrapolation::DiscLoading { .. }))
        );
        assert!(
            power
                .extrapolations
                .iter()
                .any(|e| matches!(e, Extrapolation::FigureOfMerit { .. }))
        );
    }

    #[test]
    fn rejects_non_physical_state() {
        let inputs = reference_inputs();
        assert!(matches!(
            VtolPropulsion::new(&inputs.constants, &inputs.vtol, 0.0, 12.0),
            Err(DomainError::WingLoading(_))
        ));
        assert!(matches!(
            VtolPropulsion::new(&inputs.constants, &inputs.vtol, 100.0, f64::NAN),
            Err(DomainError::TakeOffMass(_))
        ));
    }
}
