//! Result types for mass convergence and design search.

use std::fmt;

use uom::si::{
    area::square_meter,
    f64::{Area, Force, Length, Mass, Power, Pressure},
    force::newton,
    length::meter,
    mass::kilogram,
    power::watt,
    pressure::pascal,
};

use super::{BatteryFractions, ConstraintEvaluation, DesignPoint, VtolPower};

/// An empirical regression evaluated outside its fitted range.
///
/// The value is still used; the flag lets callers judge how far to trust it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extrapolation {
    /// Per-rotor thrust above the figure-of-merit fit, N.
    FigureOfMerit { rotor_thrust: f64 },

    /// Take-off mass above the disc-loading fit, kg.
    DiscLoading { take_off_mass: f64 },
}

impl fmt::Display for Extrapolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FigureOfMerit { rotor_thrust } => {
                write!(f, "figure of merit at {rotor_thrust:.1} N per rotor")
            }
            Self::DiscLoading { take_off_mass } => {
                write!(f, "disc loading at {take_off_mass:.2} kg take-off mass")
            }
        }
    }
}

/// Propulsion quantities from the final pass of the mass loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionState {
    pub vtol_thrust_to_weight: f64,
    pub vtol_thrust: Force,
    pub figure_of_merit: f64,
    pub vtol_hover_power: Power,

    /// Sizes the VTOL motors.
    pub vtol_climb_power: Power,

    pub disc_loading: Pressure,
    pub disc_area: Area,

    /// Diameter of one lift rotor.
    pub vtol_propeller_diameter: Length,

    /// Installed cruise power, power loading times take-off weight.
    pub cruise_power: Power,

    pub cruise_propeller_diameter: Length,
}

impl PropulsionState {
    pub(crate) fn new(vtol: &VtolPower, cruise_power: f64, cruise_diameter: f64) -> Self {
        Self {
            vtol_thrust_to_weight: vtol.thrust_to_weight,
            vtol_thrust: Force::new::<newton>(vtol.thrust),
            figure_of_merit: vtol.figure_of_merit,
            vtol_hover_power: Power::new::<watt>(vtol.hover_power),
            vtol_climb_power: Power::new::<watt>(vtol.climb_power),
            disc_loading: Pressure::new::<pascal>(vtol.disc_loading),
            disc_area: Area::new::<square_meter>(vtol.disc_area),
            vtol_propeller_diameter: Length::new::<meter>(vtol.rotor_diameter),
            cruise_power: Power::new::<watt>(cruise_power),
            cruise_propeller_diameter: Length::new::<meter>(cruise_diameter),
        }
    }
}

/// A converged mass budget.
///
/// Absolute masses plus fractions of take-off mass sum to the take-off mass.
#[derive(Debug, Clone, PartialEq)]
pub struct MassBreakdown {
    pub take_off_mass: Mass,

    /// Battery fraction for the configured mission mode.
    pub battery_fraction: f64,

    /// Battery fractions per segment.
    pub battery_fractions: BatteryFractions,

    pub vtol_propulsion_mass: Mass,
    pub cruise_propulsion_mass: Mass,
    pub payload_mass: Mass,
    pub structure_fraction: f64,
    pub avionics_fraction: f64,
    pub subsystem_fraction: f64,

    pub propulsion: PropulsionState,

    /// Passes of the mass loop, including the converged one.
    pub iterations: usize,

    /// Regressions used outside their fitted range on the final pass.
    pub extrapolations: Vec<Extrapolation>,
}

impl MassBreakdown {
    #[must_use]
    pub fn battery_mass(&self) -> Mass {
        self.take_off_mass * self.battery_fraction
    }

    #[must_use]
    pub fn structure_mass(&self) -> Mass {
        self.take_off_mass * self.structure_fraction
    }

    #[must_use]
    pub fn avionics_mass(&self) -> Mass {
        self.take_off_mass * self.avionics_fraction
    }

    #[must_use]
    pub fn subsystem_mass(&self) -> Mass {
        self.take_off_mass * self.subsystem_fraction
    }

    /// Sum of all component masses minus the take-off mass.
    #[must_use]
    pub fn closure_error(&self) -> Mass {
        self.battery_mass()
            + self.structure_mass()
            + self.avionics_mass()
            + self.subsystem_mass()
            + self.vtol_propulsion_mass
            + self.cruise_propulsion_mass
            + self.payload_mass
            - self.take_off_mass
    }

    pub(crate) fn take_off_kg(&self) -> f64 {
        self.take_off_mass.get::<kilogram>()
    }
}

/// Installed propulsion mass per branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionMasses {
    pub cruise: Mass,
    pub vtol: Mass,
}

/// Bookkeeping from one design search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Grid points scanned.
    pub grid_points: usize,

    /// Grid points meeting every constraint.
    pub feasible_points: usize,

    /// Design points actually evaluated, grid and refinement combined.
    pub evaluations: usize,

    /// Evaluations served from the cache.
    pub cache_hits: usize,

    /// Whether refinement replaced the best grid point.
    pub refined: bool,
}

/// The selected design.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub take_off_mass: Mass,
    pub design: DesignPoint,
    pub wingspan: Length,
    pub cruise_propeller_diameter: Length,
    pub vtol_propeller_diameter: Length,
    pub battery_mass: Mass,
    pub propulsion: PropulsionMasses,
    pub breakdown: MassBreakdown,

    /// Margins of the selected design, all non-negative within tolerance.
    pub constraints: Vec<ConstraintEvaluation>,

    pub extrapolations: Vec<Extrapolation>,
    pub stats: SearchStats,
}

impl SizingResult {
    pub(crate) fn new(
        design: DesignPoint,
        wingspan: f64,
        breakdown: MassBreakdown,
        constraints: Vec<ConstraintEvaluation>,
        stats: SearchStats,
    ) -> Self {
        Self {
            take_off_mass: breakdown.take_off_mass,
            design,
            wingspan: Length::new::<meter>(wingspan),
            cruise_propeller_diameter: breakdown.propulsion.cruise_propeller_diameter,
            vtol_propeller_diameter: breakdown.propulsion.vtol_propeller_diameter,
            battery_mass: breakdown.battery_mass(),
            propulsion: PropulsionMasses {
                cruise: breakdown.cruise_propulsion_mass,
                vtol: breakdown.vtol_propulsion_mass,
            },
            extrapolations: breakdown.extrapolations.clone(),
            breakdown,
            constraints,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrapolation_messages() {
        let fm = Extrapolation::FigureOfMerit {
            rotor_thrust: 120.0,
        };
        assert_eq!(fm.to_string(), "figure of merit at 120.0 N per rotor");

        let dl = Extrapolation::DiscLoading {
            take_off_mass: 25.0,
        };
        assert_eq!(dl.to_string(), "disc loading at 25.00 kg take-off mass");
    }
}
