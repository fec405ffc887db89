//! TOML configuration for [`HybridVtolSizing`].
//!
//! Every field has a reference default, so a file only lists what differs:
//!
//! ```
//! use twine_sizing::models::aircraft::hybrid_vtol::SizingConfig;
//!
//! let config = SizingConfig::from_toml_str(
//!     r#"
//!     [mission]
//!     range_km = 40.0
//!
//!     [mass]
//!     payload_kg = 1.5
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.mission.range_km, 40.0);
//! assert_eq!(config.vtol.rotors, 4);
//! let sizing = config.build().unwrap();
//! # let _ = sizing;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    available_energy::joule_per_kilogram,
    electric_potential::volt,
    f64::{
        Acceleration, AvailableEnergy, ElectricPotential, Length, Mass, MassDensity, Time,
        Velocity,
    },
    length::{kilometer, meter},
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    time::second,
    velocity::meter_per_second,
};

use super::{
    AerodynamicsInput, Axis, BatteryInput, BranchLayout, ConvergenceConfig, DomainError,
    GeometryLimits, HybridVtolSizing, MassInput, MissionInput, MissionMode, PhysicalConstants,
    PropulsionInput, RefineConfig, SearchConfig, SizingInputs, VtolInput,
};

const JOULES_PER_WATT_HOUR: f64 = 3600.0;

/// Errors that can occur while loading a sizing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is not physically valid.
    #[error("invalid configuration")]
    Domain(#[from] DomainError),
}

/// Complete sizing configuration, one TOML table per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    pub constants: ConstantsConfig,
    pub aerodynamics: AerodynamicsConfig,
    pub mission: MissionConfig,
    pub vtol: VtolConfig,
    pub propulsion: PropulsionConfig,
    pub battery: BatteryConfig,
    pub mass: MassConfig,
    pub limits: LimitsConfig,
    pub solver: SolverConfig,
    pub search: SearchSection,
}

impl SizingConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validates every section into typed inputs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] naming the first invalid field.
    pub fn inputs(&self) -> Result<SizingInputs, DomainError> {
        Ok(SizingInputs {
            constants: self.constants.build()?,
            aerodynamics: self.aerodynamics.build()?,
            mission: self.mission.build()?,
            vtol: self.vtol.build()?,
            propulsion: self.propulsion.build()?,
            battery: self.battery.build()?,
            mass: self.mass.build()?,
            limits: self.limits.build()?,
        })
    }

    /// Validates the configuration into a ready-to-run sizing problem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Domain`] if any value is invalid.
    pub fn build(&self) -> Result<HybridVtolSizing, ConfigError> {
        Ok(HybridVtolSizing::with_config(
            self.inputs()?,
            self.solver.convergence(),
            self.search.search(),
        )?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstantsConfig {
    pub air_density_kg_m3: f64,
    pub gravity_m_s2: f64,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            air_density_kg_m3: 0.9013,
            gravity_m_s2: 9.81,
        }
    }
}

impl ConstantsConfig {
    fn build(&self) -> Result<PhysicalConstants, DomainError> {
        PhysicalConstants::new(
            MassDensity::new::<kilogram_per_cubic_meter>(self.air_density_kg_m3),
            Acceleration::new::<meter_per_second_squared>(self.gravity_m_s2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AerodynamicsConfig {
    pub oswald_efficiency: f64,
    pub aspect_ratio: f64,
    pub max_lift_coefficient: f64,
    pub zero_lift_drag: f64,
    pub propeller_efficiency: f64,
}

impl Default for AerodynamicsConfig {
    fn default() -> Self {
        Self {
            oswald_efficiency: 0.8,
            aspect_ratio: 10.0,
            max_lift_coefficient: 1.34,
            zero_lift_drag: 0.03,
            propeller_efficiency: 0.7,
        }
    }
}

impl AerodynamicsConfig {
    fn build(&self) -> Result<AerodynamicsInput, DomainError> {
        Ok(AerodynamicsInput {
            oswald_efficiency: DomainError::check("oswald_efficiency", self.oswald_efficiency)?,
            aspect_ratio: DomainError::check("aspect_ratio", self.aspect_ratio)?,
            max_lift_coefficient: DomainError::check(
                "max_lift_coefficient",
                self.max_lift_coefficient,
            )?,
            zero_lift_drag: DomainError::check("zero_lift_drag", self.zero_lift_drag)?,
            propeller_efficiency: DomainError::check(
                "propeller_efficiency",
                self.propeller_efficiency,
            )?,
        })
    }
}

/// Cruise segment the battery is sized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeConfig {
    #[default]
    Range,
    Endurance,
}

impl From<ModeConfig> for MissionMode {
    fn from(mode: ModeConfig) -> Self {
        match mode {
            ModeConfig::Range => Self::Range,
            ModeConfig::Endurance => Self::Endurance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionConfig {
    pub cruise_speed_m_s: f64,
    pub stall_speed_m_s: f64,
    pub climb_rate_m_s: f64,
    pub ceiling_climb_rate_m_s: f64,
    pub transition_altitude_m: f64,
    pub cruise_altitude_m: f64,
    pub hover_time_s: f64,
    pub range_km: f64,
    pub endurance_s: f64,
    pub mode: ModeConfig,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            cruise_speed_m_s: 25.0,
            stall_speed_m_s: 13.8,
            climb_rate_m_s: 2.5,
            ceiling_climb_rate_m_s: 0.5,
            transition_altitude_m: 30.0,
            cruise_altitude_m: 500.0,
            hover_time_s: 120.0,
            range_km: 60.0,
            endurance_s: 3600.0,
            mode: ModeConfig::Range,
        }
    }
}

impl MissionConfig {
    fn build(&self) -> Result<MissionInput, DomainError> {
        let mps = Velocity::new::<meter_per_second>;
        Ok(MissionInput {
            cruise_speed: DomainError::check("cruise_speed", mps(self.cruise_speed_m_s))?,
            stall_speed: DomainError::check("stall_speed", mps(self.stall_speed_m_s))?,
            cruise_climb_rate: DomainError::check("climb_rate", mps(self.climb_rate_m_s))?,
            ceiling_climb_rate: DomainError::check(
                "ceiling_climb_rate",
                mps(self.ceiling_climb_rate_m_s),
            )?,
            transition_altitude: DomainError::check(
                "transition_altitude",
                Length::new::<meter>(self.transition_altitude_m),
            )?,
            cruise_altitude: DomainError::check(
                "cruise_altitude",
                Length::new::<meter>(self.cruise_altitude_m),
            )?,
            hover_time: DomainError::check("hover_time", Time::new::<second>(self.hover_time_s))?,
            range: DomainError::check("range", Length::new::<kilometer>(self.range_km))?,
            endurance: DomainError::check("endurance", Time::new::<second>(self.endurance_s))?,
            mode: self.mode.into(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VtolConfig {
    pub rotors: u32,
    pub projected_area_ratio: f64,
    pub climb_rate_m_s: f64,
}

impl Default for VtolConfig {
    fn default() -> Self {
        Self {
            rotors: 4,
            projected_area_ratio: 1.0,
            climb_rate_m_s: 2.0,
        }
    }
}

impl VtolConfig {
    fn build(&self) -> Result<VtolInput, DomainError> {
        VtolInput::new(
            self.rotors,
            self.projected_area_ratio,
            Velocity::new::<meter_per_second>(self.climb_rate_m_s),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropulsionConfig {
    pub max_voltage_v: f64,
    pub cruise_motors: u32,
    pub cruise_propellers: u32,
    pub cruise_blades: u32,
    pub cruise_install_factor: f64,
    pub vtol_blades: u32,
    pub vtol_install_factor: f64,
}

impl Default for PropulsionConfig {
    fn default() -> Self {
        Self {
            max_voltage_v: 22.2,
            cruise_motors: 1,
            cruise_propellers: 1,
            cruise_blades: 2,
            cruise_install_factor: 1.2,
            vtol_blades: 2,
            vtol_install_factor: 1.2,
        }
    }
}

impl PropulsionConfig {
    fn build(&self) -> Result<PropulsionInput, DomainError> {
        Ok(PropulsionInput {
            max_voltage: DomainError::check(
                "max_voltage",
                ElectricPotential::new::<volt>(self.max_voltage_v),
            )?,
            cruise: BranchLayout {
                motors: DomainError::check("cruise_motors", self.cruise_motors)?,
                propellers: DomainError::check("cruise_propellers", self.cruise_propellers)?,
                blades: DomainError::check("cruise_blades", self.cruise_blades)?,
                install_factor: DomainError::check(
                    "cruise_install_factor",
                    self.cruise_install_factor,
                )?,
            },
            vtol_blades: DomainError::check("vtol_blades", self.vtol_blades)?,
            vtol_install_factor: DomainError::check(
                "vtol_install_factor",
                self.vtol_install_factor,
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    pub specific_energy_wh_kg: f64,
    pub battery_efficiency: f64,
    pub electrical_efficiency: f64,
    pub usable_fraction: f64,
    pub max_lift_to_drag: f64,
    pub endurance_lift_coefficient: f64,
    pub endurance_drag_coefficient: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            specific_energy_wh_kg: 200.0,
            battery_efficiency: 0.95,
            electrical_efficiency: 0.9,
            usable_fraction: 0.8,
            max_lift_to_drag: 12.0,
            endurance_lift_coefficient: 0.8,
            endurance_drag_coefficient: 0.06,
        }
    }
}

impl BatteryConfig {
    fn build(&self) -> Result<BatteryInput, DomainError> {
        Ok(BatteryInput {
            specific_energy: DomainError::check(
                "specific_energy",
                AvailableEnergy::new::<joule_per_kilogram>(
                    self.specific_energy_wh_kg * JOULES_PER_WATT_HOUR,
                ),
            )?,
            battery_efficiency: DomainError::check("battery_efficiency", self.battery_efficiency)?,
            electrical_efficiency: DomainError::check(
                "electrical_efficiency",
                self.electrical_efficiency,
            )?,
            usable_fraction: DomainError::check("usable_fraction", self.usable_fraction)?,
            max_lift_to_drag: DomainError::check("max_lift_to_drag", self.max_lift_to_drag)?,
            endurance_lift_coefficient: DomainError::check(
                "endurance_lift_coefficient",
                self.endurance_lift_coefficient,
            )?,
            endurance_drag_coefficient: DomainError::check(
                "endurance_drag_coefficient",
                self.endurance_drag_coefficient,
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MassConfig {
    pub payload_kg: f64,
    pub structure_fraction: f64,
    pub avionics_fraction: f64,
    pub subsystem_fraction: f64,
}

impl Default for MassConfig {
    fn default() -> Self {
        Self {
            payload_kg: 2.0,
            structure_fraction: 0.35,
            avionics_fraction: 0.05,
            subsystem_fraction: 0.10,
        }
    }
}

impl MassConfig {
    fn build(&self) -> Result<MassInput, DomainError> {
        Ok(MassInput {
            payload: DomainError::check("payload", Mass::new::<kilogram>(self.payload_kg))?,
            structure_fraction: DomainError::check("structure_fraction", self.structure_fraction)?,
            avionics_fraction: DomainError::check("avionics_fraction", self.avionics_fraction)?,
            subsystem_fraction: DomainError::check("subsystem_fraction", self.subsystem_fraction)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_wingspan_m: f64,
    pub max_propeller_diameter_m: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_wingspan_m: 4.0,
            max_propeller_diameter_m: 0.8,
        }
    }
}

impl LimitsConfig {
    fn build(&self) -> Result<GeometryLimits, DomainError> {
        Ok(GeometryLimits {
            max_wingspan: DomainError::check(
                "max_wingspan",
                Length::new::<meter>(self.max_wingspan_m),
            )?,
            max_propeller_diameter: DomainError::check(
                "max_propeller_diameter",
                Length::new::<meter>(self.max_propeller_diameter_m),
            )?,
        })
    }
}

/// Mass loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub initial_guess_kg: f64,
    pub tolerance: f64,
    pub max_iters: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let defaults = ConvergenceConfig::default();
        Self {
            initial_guess_kg: defaults.initial_guess.get::<kilogram>(),
            tolerance: defaults.tolerance,
            max_iters: defaults.max_iters,
        }
    }
}

impl SolverConfig {
    fn convergence(&self) -> ConvergenceConfig {
        ConvergenceConfig {
            initial_guess: Mass::new::<kilogram>(self.initial_guess_kg),
            tolerance: self.tolerance,
            max_iters: self.max_iters,
        }
    }
}

/// Design search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub wing_loading_min: f64,
    pub wing_loading_max: f64,
    pub wing_loading_points: usize,
    pub power_loading_min: f64,
    pub power_loading_max: f64,
    pub power_loading_points: usize,
    pub epsilon: f64,
    pub tie_tolerance: f64,
    pub parallel: bool,
    pub refine: bool,
    pub refine_max_iters: usize,
    pub margin_target: f64,
}

impl Default for SearchSection {
    fn default() -> Self {
        let search = SearchConfig::default();
        let refine = RefineConfig::default();
        Self {
            wing_loading_min: search.wing_loading.lower,
            wing_loading_max: search.wing_loading.upper,
            wing_loading_points: search.wing_loading.points,
            power_loading_min: search.power_loading.lower,
            power_loading_max: search.power_loading.upper,
            power_loading_points: search.power_loading.points,
            epsilon: search.epsilon,
            tie_tolerance: search.tie_tolerance,
            parallel: search.parallel,
            refine: search.refine.is_some(),
            refine_max_iters: refine.max_iters,
            margin_target: refine.margin_target,
        }
    }
}

impl SearchSection {
    fn search(&self) -> SearchConfig {
        SearchConfig {
            wing_loading: Axis::new(
                self.wing_loading_min,
                self.wing_loading_max,
                self.wing_loading_points,
            ),
            power_loading: Axis::new(
                self.power_loading_min,
                self.power_loading_max,
                self.power_loading_points,
            ),
            epsilon: self.epsilon,
            tie_tolerance: self.tie_tolerance,
            parallel: self.parallel,
            refine: self.refine.then(|| RefineConfig {
                max_iters: self.refine_max_iters,
                margin_target: self.margin_target,
                ..RefineConfig::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn empty_file_is_the_reference_case() {
        let config = SizingConfig::from_toml_str("").unwrap();
        assert_eq!(config, SizingConfig::default());

        let sizing = config.build().unwrap();
        assert_eq!(sizing.search_config(), &SearchConfig::default());
        assert_eq!(sizing.convergence_config(), &ConvergenceConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SizingConfig::from_toml_str(
            r#"
            [mission]
            range_km = 30.0
            mode = "endurance"

            [vtol]
            rotors = 6
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.mission.range_km, 30.0);
        assert_eq!(config.mission.mode, ModeConfig::Endurance);
        assert_relative_eq!(config.mission.cruise_speed_m_s, 25.0);
        assert_eq!(config.vtol.rotors, 6);

        let inputs = config.inputs().unwrap();
        assert_eq!(inputs.mission.mode, MissionMode::Endurance);
        assert_relative_eq!(inputs.mission.range.get().get::<meter>(), 30_000.0);
        assert_relative_eq!(
            inputs.battery.specific_energy.get().get::<joule_per_kilogram>(),
            720_000.0
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SizingConfig::from_toml_str("[mission]\nrange_miles = 10.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn invalid_values_name_the_field() {
        let config = SizingConfig::from_toml_str("[vtol]\nrotors = 0\n").unwrap();
        let err = config.build().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Domain(DomainError::InvalidInput {
                field: "rotor_count",
                source: ConstraintError::Zero,
            })
        ));
    }

    #[test]
    fn inverted_altitudes_are_rejected() {
        let config = SizingConfig::from_toml_str(
            "[mission]\ntransition_altitude_m = 600.0\ncruise_altitude_m = 500.0\n",
        )
        .unwrap();

        assert!(matches!(
            config.build(),
            Err(ConfigError::Domain(DomainError::Altitudes { .. }))
        ));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let text = toml::to_string(&SizingConfig::default()).unwrap();
        assert_eq!(
            SizingConfig::from_toml_str(&text).unwrap(),
            SizingConfig::default()
        );
    }

    #[test]
    fn load_reads_files() {
        let path = std::env::temp_dir().join("twine_sizing_load_reads_files.toml");
        std::fs::write(&path, "[mass]\npayload_kg = 3.0\n").unwrap();

        let config = SizingConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_relative_eq!(config.mass.payload_kg, 3.0);

        assert!(matches!(
            SizingConfig::load(std::env::temp_dir().join("twine_sizing_missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
