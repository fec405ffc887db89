//! Fixed-point iteration on take-off mass.
//!
//! Each pass sizes the VTOL rotors, propulsion and battery for the current
//! guess, then closes the mass budget:
//!
//! ```text
//! m_new = (m_vtol + m_cruise + m_payload) / (1 - (f_batt + f_struct + f_avion + f_sub))
//! ```
//!
//! The loop stops once the relative change between passes drops below the
//! configured tolerance.

mod config;
mod error;

pub use config::ConvergenceConfig;
pub use error::ConvergenceError;

use uom::si::{f64::Mass, mass::kilogram};

use super::{
    BatteryFractions, BatteryMass, BranchMasses, DesignPoint, MassBreakdown, PropulsionMass,
    PropulsionState, SizingInputs, VtolPower, VtolPropulsion,
};

/// Everything computed during one pass of the mass loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    /// Take-off mass the pass started from, kg.
    pub guess: f64,

    /// Closed-budget take-off mass, kg.
    pub estimate: f64,

    pub battery: BatteryFractions,

    /// Battery fraction for the configured mission mode.
    pub battery_fraction: f64,

    /// Installed propulsion masses, kg.
    pub masses: BranchMasses,

    pub vtol: VtolPower,

    /// Installed cruise power, W.
    pub cruise_power: f64,

    /// Cruise propeller diameter, m.
    pub cruise_diameter: f64,
}

impl Pass {
    /// `|estimate - guess| / guess`
    #[must_use]
    pub fn relative_change(&self) -> f64 {
        ((self.estimate - self.guess) / self.guess).abs()
    }

    fn is_finite(&self) -> bool {
        [
            self.estimate,
            self.battery_fraction,
            self.masses.cruise,
            self.masses.vtol,
            self.cruise_power,
            self.cruise_diameter,
            self.vtol.climb_power,
            self.vtol.rotor_diameter,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}

enum State {
    Guessing,
    Evaluating { iteration: usize, guess: f64 },
    Converged { pass: Pass, iterations: usize },
    Diverged(ConvergenceError),
}

/// Take-off mass solver for a single design point.
#[derive(Debug, Clone, Copy)]
pub struct MassConvergence<'a> {
    inputs: &'a SizingInputs,
    config: ConvergenceConfig,
}

impl<'a> MassConvergence<'a> {
    #[must_use]
    pub fn new(inputs: &'a SizingInputs, config: ConvergenceConfig) -> Self {
        Self { inputs, config }
    }

    /// Runs one pass of the mass loop from `guess` kg.
    ///
    /// Depends only on its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError::NonFinite`] if sizing the rotors or cruise
    /// motor overflows, [`ConvergenceError::FractionsExceedUnity`] if the
    /// fractions leave no room for absolute masses, or
    /// [`ConvergenceError::Domain`] if a component model rejects its inputs.
    pub fn step(&self, point: DesignPoint, guess: f64) -> Result<Pass, ConvergenceError> {
        let inputs = self.inputs;
        let constants = &inputs.constants;
        let wing_loading = point.wing_loading();

        let vtol =
            VtolPropulsion::new(constants, &inputs.vtol, wing_loading, guess)?.power_required();

        let cruise_power = point.power_loading() * guess * constants.g();
        let sized = [cruise_power, vtol.climb_power, vtol.rotor_diameter];
        if !sized.iter().all(|value| value.is_finite()) {
            return Err(ConvergenceError::NonFinite { guess });
        }

        let propulsion = PropulsionMass::new(constants, &inputs.propulsion, &inputs.vtol);
        let cruise_diameter = propulsion.cruise_propeller_diameter(cruise_power);
        let masses =
            propulsion.total_propulsion_mass(cruise_power, vtol.climb_power, vtol.rotor_diameter)?;

        let battery = BatteryMass::new(
            constants,
            &inputs.aerodynamics,
            &inputs.mission,
            &inputs.battery,
            &inputs.vtol,
        )?
        .total(&vtol, wing_loading, guess)?;
        let battery_fraction = battery.for_mode(inputs.mission.mode);

        let sum = battery_fraction + inputs.mass.fixed_fractions();
        if sum >= 1.0 {
            return Err(ConvergenceError::FractionsExceedUnity { sum });
        }

        let estimate = (masses.vtol + masses.cruise + inputs.mass.payload_kg()) / (1.0 - sum);

        Ok(Pass {
            guess,
            estimate,
            battery,
            battery_fraction,
            masses,
            vtol,
            cruise_power,
            cruise_diameter,
        })
    }

    /// Iterates [`step`](Self::step) until the take-off mass converges.
    ///
    /// At least one pass always runs, even if `max_iters` is zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvergenceError`] if a pass fails, produces a non-finite
    /// value, or the pass limit is reached.
    pub fn solve(&self, point: DesignPoint) -> Result<MassBreakdown, ConvergenceError> {
        let mut state = State::Guessing;
        loop {
            state = match state {
                State::Guessing => State::Evaluating {
                    iteration: 1,
                    guess: self.config.initial_guess.get::<kilogram>(),
                },
                State::Evaluating { iteration, guess } => self.advance(point, iteration, guess),
                State::Converged { pass, iterations } => {
                    log::debug!(
                        "converged {point:?} to {:.4} kg in {iterations} passes",
                        pass.estimate
                    );
                    return Ok(self.breakdown(pass, iterations));
                }
                State::Diverged(error) => {
                    log::debug!("mass loop failed at {point:?}: {error}");
                    return Err(error);
                }
            };
        }
    }

    fn advance(&self, point: DesignPoint, iteration: usize, guess: f64) -> State {
        let pass = match self.step(point, guess) {
            Ok(pass) => pass,
            Err(error) => return State::Diverged(error),
        };

        if !pass.is_finite() {
            return State::Diverged(ConvergenceError::NonFinite { guess });
        }

        let change = pass.relative_change();
        log::trace!(
            "pass {iteration}: {guess:.6} kg -> {:.6} kg (change {change:.3e})",
            pass.estimate
        );

        if change < self.config.tolerance {
            State::Converged {
                pass,
                iterations: iteration,
            }
        } else if iteration >= self.config.max_iters {
            State::Diverged(ConvergenceError::MaxIters {
                mass: Mass::new::<kilogram>(pass.estimate),
                residual: change,
                iters: iteration,
            })
        } else {
            State::Evaluating {
                iteration: iteration + 1,
                guess: pass.estimate,
            }
        }
    }

    fn breakdown(&self, pass: Pass, iterations: usize) -> MassBreakdown {
        let mass = &self.inputs.mass;
        MassBreakdown {
            take_off_mass: Mass::new::<kilogram>(pass.estimate),
            battery_fraction: pass.battery_fraction,
            battery_fractions: pass.battery,
            vtol_propulsion_mass: Mass::new::<kilogram>(pass.masses.vtol),
            cruise_propulsion_mass: Mass::new::<kilogram>(pass.masses.cruise),
            payload_mass: mass.payload.get(),
            structure_fraction: mass.structure_fraction.get(),
            avionics_fraction: mass.avionics_fraction.get(),
            subsystem_fraction: mass.subsystem_fraction.get(),
            propulsion: PropulsionState::new(&pass.vtol, pass.cruise_power, pass.cruise_diameter),
            iterations,
            extrapolations: pass.vtol.extrapolations,
        }
    }
}
