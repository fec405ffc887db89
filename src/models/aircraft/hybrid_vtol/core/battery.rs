//! Battery mass fractions for each mission segment.
//!
//! Every fraction is segment energy over take-off mass times the effective
//! specific energy `E* = E_spec · η_batt · η_elec · f_usable`.

use super::{
    AerodynamicsInput, BatteryInput, DomainError, MissionInput, MissionMode, PhysicalConstants,
    VtolPower, VtolInput, error::positive_finite,
};

/// Battery sizing model for one aircraft configuration.
#[derive(Debug, Clone, Copy)]
pub struct BatteryMass<'a> {
    constants: &'a PhysicalConstants,
    aero: &'a AerodynamicsInput,
    mission: &'a MissionInput,
    battery: &'a BatteryInput,
    vtol: &'a VtolInput,
}

/// Battery mass fractions per segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryFractions {
    pub hover: f64,
    pub climb_descent: f64,
    pub range: f64,
    pub endurance: f64,
}

impl BatteryFractions {
    /// Hover, climb/descent and range cruise.
    #[must_use]
    pub fn range_total(&self) -> f64 {
        self.hover + self.climb_descent + self.range
    }

    /// Hover, climb/descent and endurance loiter.
    #[must_use]
    pub fn endurance_total(&self) -> f64 {
        self.hover + self.climb_descent + self.endurance
    }

    /// The total the battery is sized for under `mode`.
    #[must_use]
    pub fn for_mode(&self, mode: MissionMode) -> f64 {
        match mode {
            MissionMode::Range => self.range_total(),
            MissionMode::Endurance => self.endurance_total(),
        }
    }
}

impl<'a> BatteryMass<'a> {
    /// # Errors
    ///
    /// Returns [`DomainError::Altitudes`] if the cruise altitude is below the
    /// transition altitude.
    pub fn new(
        constants: &'a PhysicalConstants,
        aero: &'a AerodynamicsInput,
        mission: &'a MissionInput,
        battery: &'a BatteryInput,
        vtol: &'a VtolInput,
    ) -> Result<Self, DomainError> {
        let (transition, cruise) = (mission.h_start(), mission.h_end());
        if cruise < transition {
            return Err(DomainError::Altitudes { transition, cruise });
        }
        Ok(Self {
            constants,
            aero,
            mission,
            battery,
            vtol,
        })
    }

    /// Hover fraction, `t_hover · g · v_h / (FM · E*)`.
    ///
    /// The figure of merit is the per-rotor value carried by `power`.
    #[must_use]
    pub fn hover_fraction(&self, power: &VtolPower) -> f64 {
        self.mission.t_hover() * self.constants.g() * power.hover_induced_velocity
            / (power.figure_of_merit * self.specific_energy())
    }

    /// Vertical climb to and descent from the transition altitude, plus the
    /// wing-borne climb to cruise altitude.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TakeOffMass`] if `take_off_mass` is not positive.
    pub fn climb_descent_fraction(
        &self,
        power: &VtolPower,
        take_off_mass: f64,
    ) -> Result<f64, DomainError> {
        let mass = positive_finite(take_off_mass).ok_or(DomainError::TakeOffMass(take_off_mass))?;
        let h_start = self.mission.h_start();
        let vertical_time = h_start / self.vtol.roc();

        let vtol_energy = (power.climb_power + power.hover_power) * vertical_time;

        let climb_height = self.mission.h_end() - h_start;
        let glide_drag = self.mission.v_cruise()
            / (self.mission.rate_of_climb() * self.battery.max_lift_to_drag.get());
        let wing_energy = mass * self.constants.g() * climb_height * (1.0 + glide_drag)
            / self.aero.propeller_efficiency.get();

        Ok((vtol_energy + wing_energy) / (mass * self.specific_energy()))
    }

    /// Range cruise at best L/D, `R · g / (LD_max · η_prop · E*)`.
    #[must_use]
    pub fn range_fraction(&self) -> f64 {
        self.mission.range_m() * self.constants.g()
            / (self.battery.max_lift_to_drag.get()
                * self.aero.propeller_efficiency.get()
                * self.specific_energy())
    }

    /// Loiter at the minimum-power condition,
    /// `t_end · g · sqrt(2·W/S / ρ) · CD / CL^1.5 / (η_prop · E*)`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WingLoading`] if `wing_loading` is not positive.
    pub fn endurance_fraction(&self, wing_loading: f64) -> Result<f64, DomainError> {
        let wing_loading =
            positive_finite(wing_loading).ok_or(DomainError::WingLoading(wing_loading))?;
        let speed = (2.0 * wing_loading / self.constants.rho()).sqrt();
        let cl = self.battery.endurance_lift_coefficient.get();
        let cd = self.battery.endurance_drag_coefficient.get();
        Ok(
            self.mission.endurance_s() * self.constants.g() * speed * cd / cl.powf(1.5)
                / (self.aero.propeller_efficiency.get() * self.specific_energy()),
        )
    }

    /// All segment fractions for one pass of the mass loop.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if wing loading or take-off mass is not positive.
    pub fn total(
        &self,
        power: &VtolPower,
        wing_loading: f64,
        take_off_mass: f64,
    ) -> Result<BatteryFractions, DomainError> {
        Ok(BatteryFractions {
            hover: self.hover_fraction(power),
            climb_descent: self.climb_descent_fraction(power, take_off_mass)?,
            range: self.range_fraction(),
            endurance: self.endurance_fraction(wing_loading)?,
        })
    }

    fn specific_energy(&self) -> f64 {
        self.battery.effective_specific_energy()
    }
}
