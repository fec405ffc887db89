//! Motor, ESC and propeller masses from empirical power-law regressions.
//!
//! Every function here is pure and increasing in power, so results depend
//! only on their arguments and may be cached freely.

use crate::support::constraint::{Constrained, NonNegative};

use super::{BranchLayout, DomainError, PhysicalConstants, PropulsionInput, VtolInput};

/// Mass model for the cruise and VTOL propulsion branches.
#[derive(Debug, Clone, Copy)]
pub struct PropulsionMass<'a> {
    constants: &'a PhysicalConstants,
    propulsion: &'a PropulsionInput,
    vtol: &'a VtolInput,
}

/// Installed propulsion masses, kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchMasses {
    pub cruise: f64,
    pub vtol: f64,
}

impl<'a> PropulsionMass<'a> {
    #[must_use]
    pub fn new(
        constants: &'a PhysicalConstants,
        propulsion: &'a PropulsionInput,
        vtol: &'a VtolInput,
    ) -> Self {
        Self {
            constants,
            propulsion,
            vtol,
        }
    }

    /// Mass of one motor rated for `power` W, kg.
    #[must_use]
    pub fn motor_mass(&self, power: f64) -> f64 {
        self.constants
            .regressions
            .motor
            .mass(power, self.propulsion.voltage())
    }

    /// Mass of one ESC rated for `power` W, kg.
    #[must_use]
    pub fn esc_mass(&self, power: f64) -> f64 {
        self.constants.regressions.esc.eval(power)
    }

    /// Mass of one propeller absorbing `power` W at `diameter` m, kg.
    #[must_use]
    pub fn propeller_mass(&self, power: f64, diameter: f64, blades: u32) -> f64 {
        self.constants
            .regressions
            .propeller
            .mass(power, diameter, blades)
    }

    /// Cruise propeller diameter, `K_p · (P_cruise / n_props)^(1/4)` m.
    #[must_use]
    pub fn cruise_propeller_diameter(&self, cruise_power: f64) -> f64 {
        let per_prop = cruise_power / f64::from(self.propulsion.cruise.propellers.get());
        self.constants.regressions.cruise_diameter_constant * per_prop.powf(0.25)
    }

    /// Installed mass of one branch, `install · (n_motors·(motor + esc) + n_props·prop)`.
    ///
    /// `max_power` is the total shaft power of the branch.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if `max_power` or `diameter` is
    /// negative or not a number.
    pub fn branch_mass(
        &self,
        layout: &BranchLayout,
        max_power: f64,
        diameter: f64,
    ) -> Result<f64, DomainError> {
        let max_power: Constrained<f64, NonNegative> =
            DomainError::check("propulsion_power", max_power)?;
        let diameter: Constrained<f64, NonNegative> =
            DomainError::check("propeller_diameter", diameter)?;
        let (max_power, diameter) = (max_power.into_inner(), diameter.into_inner());

        let motors = f64::from(layout.motors.get());
        let propellers = f64::from(layout.propellers.get());

        let per_motor = max_power / motors;
        let per_prop = max_power / propellers;

        let drive = motors * (self.motor_mass(per_motor) + self.esc_mass(per_motor));
        let props = propellers * self.propeller_mass(per_prop, diameter, layout.blades.get());

        Ok(layout.install_factor.get() * (drive + props))
    }

    /// Installed masses of both branches.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if any power or diameter is non-physical.
    pub fn total_propulsion_mass(
        &self,
        cruise_power: f64,
        vtol_power: f64,
        vtol_diameter: f64,
    ) -> Result<BranchMasses, DomainError> {
        let cruise_diameter = self.cruise_propeller_diameter(cruise_power);
        let vtol_layout = self.propulsion.vtol_layout(self.vtol.rotor_count);
        Ok(BranchMasses {
            cruise: self.branch_mass(&self.propulsion.cruise, cruise_power, cruise_diameter)?,
            vtol: self.branch_mass(&vtol_layout, vtol_power, vtol_diameter)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::aircraft::hybrid_vtol::core::test_support::reference_inputs;

    #[test]
    fn cruise_propeller_diameter_reference_case() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        let diameter = model.cruise_propeller_diameter(2000.0);
        let expected = 0.0938 * 2000.0_f64.powf(0.25);
        assert_relative_eq!(diameter, expected, max_relative = 0.01);
    }

    #[test]
    fn motor_mass_regression() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        assert_relative_eq!(
            model.motor_mass(600.0),
            0.0109 * 600.0_f64.powf(0.5122) * 22.2_f64.powf(-0.1902),
            max_relative = 1e-12
        );
    }

    #[test]
    fn component_masses_increase_with_power() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        for (low, high) in [(100.0, 200.0), (500.0, 2000.0)] {
            assert!(model.motor_mass(high) > model.motor_mass(low));
            assert!(model.esc_mass(high) > model.esc_mass(low));
            assert!(model.propeller_mass(high, 0.5, 2) > model.propeller_mass(low, 0.5, 2));
            assert!(model.cruise_propeller_diameter(high) > model.cruise_propeller_diameter(low));
        }
    }

    #[test]
    fn branch_mass_applies_install_factor() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        let layout = inputs.propulsion.cruise;
        let d = model.cruise_propeller_diameter(800.0);
        let bare =
            model.motor_mass(800.0) + model.esc_mass(800.0) + model.propeller_mass(800.0, d, 2);

        assert_relative_eq!(
            model.branch_mass(&layout, 800.0, d).unwrap(),
            1.2 * bare,
            max_relative = 1e-12
        );
    }

    #[test]
    fn vtol_branch_splits_power_across_rotors() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        let masses = model.total_propulsion_mass(600.0, 2400.0, 0.6).unwrap();
        let per_rotor =
            model.motor_mass(600.0) + model.esc_mass(600.0) + model.propeller_mass(600.0, 0.6, 2);

        assert_relative_eq!(masses.vtol, 1.2 * 4.0 * per_rotor, max_relative = 1e-12);
        assert!(masses.cruise > 0.0);
    }

    #[test]
    fn rejects_nan_power() {
        let inputs = reference_inputs();
        let model = PropulsionMass::new(&inputs.constants, &inputs.propulsion, &inputs.vtol);

        assert!(matches!(
            model.total_propulsion_mass(f64::NAN, 100.0, 0.5),
            Err(DomainError::InvalidInput {
                field: "propulsion_power",
                ..
            })
        ));
    }
}
