//! Process-wide physical constants and empirical regressions.
//!
//! Every model receives the same [`PhysicalConstants`] by reference, so air
//! density, gravity and regression coefficients are defined exactly once.

use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, MassDensity},
    mass_density::kilogram_per_cubic_meter,
};

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{DomainError, Extrapolation};

/// Air properties, gravity and empirical sizing regressions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Air density at the design altitude.
    pub air_density: Constrained<MassDensity, StrictlyPositive>,

    /// Gravitational acceleration.
    pub gravity: Constrained<Acceleration, StrictlyPositive>,

    /// Empirical regression coefficients.
    pub regressions: Regressions,
}

impl PhysicalConstants {
    /// Constructs validated constants with the default regressions.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if density or gravity is not strictly positive.
    pub fn new(air_density: MassDensity, gravity: Acceleration) -> Result<Self, DomainError> {
        Ok(Self {
            air_density: DomainError::check("air_density", air_density)?,
            gravity: DomainError::check("gravity", gravity)?,
            regressions: Regressions::default(),
        })
    }

    /// Replaces the regression coefficients.
    #[must_use]
    pub fn with_regressions(self, regressions: Regressions) -> Self {
        Self {
            regressions,
            ..self
        }
    }

    /// Air density in kg/m³.
    pub(crate) fn rho(&self) -> f64 {
        self.air_density.as_ref().get::<kilogram_per_cubic_meter>()
    }

    /// Gravitational acceleration in m/s².
    pub(crate) fn g(&self) -> f64 {
        self.gravity.as_ref().get::<meter_per_second_squared>()
    }
}

/// Empirical coefficients shared by the propulsion, VTOL and battery models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regressions {
    /// Brushless motor mass, `F1 · P^E1 · U^E2` (kg, W, V).
    pub motor: MotorRegression,

    /// ESC mass, `coefficient · P^exponent` (kg, W).
    pub esc: PowerLaw,

    /// Propeller mass regression.
    pub propeller: PropellerRegression,

    /// Cruise propeller diameter constant `K_p` in `D = K_p · P^(1/4)` (m, W).
    pub cruise_diameter_constant: f64,

    /// Rotor figure of merit against per-rotor thrust.
    pub figure_of_merit: FigureOfMeritRegression,

    /// Rotor disc loading against take-off mass.
    pub disc_loading: DiscLoadingRegression,
}

impl Default for Regressions {
    fn default() -> Self {
        Self {
            motor: MotorRegression {
                f1: 0.0109,
                e1: 0.5122,
                e2: -0.1902,
            },
            esc: PowerLaw {
                coefficient: 2.4e-4,
                exponent: 0.8,
            },
            propeller: PropellerRegression {
                material_constant: 0.0585,
                blade_exponent: 0.391,
                power_diameter_exponent: 0.782,
            },
            cruise_diameter_constant: 0.0938,
            figure_of_merit: FigureOfMeritRegression {
                coefficient: 0.4742,
                exponent: 0.0793,
                max_rotor_thrust: 100.0,
            },
            disc_loading: DiscLoadingRegression {
                slope: 3.2261,
                intercept: 74.991,
                max_take_off_mass: 20.0,
            },
        }
    }
}

/// Coefficients of the motor mass regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorRegression {
    pub f1: f64,
    pub e1: f64,
    pub e2: f64,
}

impl MotorRegression {
    /// Motor mass in kg for a per-motor power (W) and voltage (V).
    #[must_use]
    pub fn mass(&self, power: f64, voltage: f64) -> f64 {
        self.f1 * power.powf(self.e1) * voltage.powf(self.e2)
    }
}

/// A single-term power law `coefficient · x^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub coefficient: f64,
    pub exponent: f64,
}

impl PowerLaw {
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }
}

/// Propeller mass, `K_material · n_blades^blade_exponent · (D·P/1000)^power_diameter_exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerRegression {
    pub material_constant: f64,
    pub blade_exponent: f64,
    pub power_diameter_exponent: f64,
}

impl PropellerRegression {
    /// Mass in kg of one propeller absorbing `power` W at `diameter` m.
    #[must_use]
    pub fn mass(&self, power: f64, diameter: f64, blades: u32) -> f64 {
        self.material_constant
            * f64::from(blades).powf(self.blade_exponent)
            * (diameter * power / 1000.0).powf(self.power_diameter_exponent)
    }
}

/// Figure of merit, `coefficient · T_rotor^exponent`.
///
/// Fitted for per-rotor thrust between 0 and `max_rotor_thrust` N.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureOfMeritRegression {
    pub coefficient: f64,
    pub exponent: f64,
    pub max_rotor_thrust: f64,
}

impl FigureOfMeritRegression {
    /// Figure of merit for a single rotor producing `rotor_thrust` N.
    ///
    /// Thrust outside the fitted range is evaluated anyway and flagged.
    #[must_use]
    pub fn eval(&self, rotor_thrust: f64) -> (f64, Option<Extrapolation>) {
        let flag = (rotor_thrust > self.max_rotor_thrust)
            .then_some(Extrapolation::FigureOfMerit { rotor_thrust });
        (self.coefficient * rotor_thrust.powf(self.exponent), flag)
    }
}

/// Disc loading, `slope · m_TO + intercept` (N/m², kg).
///
/// Fitted for take-off masses up to `max_take_off_mass` kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscLoadingRegression {
    pub slope: f64,
    pub intercept: f64,
    pub max_take_off_mass: f64,
}

impl DiscLoadingRegression {
    #[must_use]
    pub fn eval(&self, take_off_mass: f64) -> (f64, Option<Extrapolation>) {
        let flag = (take_off_mass > self.max_take_off_mass)
            .then_some(Extrapolation::DiscLoading { take_off_mass });
        (self.slope * take_off_mass + self.intercept, flag)
    }
}
