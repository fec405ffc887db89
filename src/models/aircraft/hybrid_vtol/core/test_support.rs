use uom::si::{
    acceleration::meter_per_second_squared,
    available_energy::joule_per_kilogram,
    electric_potential::volt,
    f64::{
        Acceleration, AvailableEnergy, ElectricPotential, Length, Mass, MassDensity, Time,
        Velocity,
    },
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    time::second,
    velocity::meter_per_second,
};

use crate::support::constraint::{Constrained, Constraint};

use super::{
    AerodynamicsInput, BatteryInput, BranchLayout, GeometryLimits, MassInput, MissionInput,
    MissionMode, PhysicalConstants, PropulsionInput, SizingInputs, VtolInput,
};

fn c<T, C: Constraint<T>>(value: T) -> Constrained<T, C> {
    Constrained::new(value).unwrap()
}

fn mps(value: f64) -> Velocity {
    Velocity::new::<meter_per_second>(value)
}

/// The reference quad-plane: 2 kg payload, 60 km range, four lift rotors.
pub(super) fn reference_inputs() -> SizingInputs {
    SizingInputs {
        constants: PhysicalConstants::new(
            MassDensity::new::<kilogram_per_cubic_meter>(0.9013),
            Acceleration::new::<meter_per_second_squared>(9.81),
        )
        .unwrap(),
        aerodynamics: AerodynamicsInput {
            oswald_efficiency: c(0.8),
            aspect_ratio: c(10.0),
            max_lift_coefficient: c(1.34),
            zero_lift_drag: c(0.03),
            propeller_efficiency: c(0.7),
        },
        mission: MissionInput {
            cruise_speed: c(mps(25.0)),
            stall_speed: c(mps(13.8)),
            cruise_climb_rate: c(mps(2.5)),
            ceiling_climb_rate: c(mps(0.5)),
            transition_altitude: c(Length::new::<meter>(30.0)),
            cruise_altitude: c(Length::new::<meter>(500.0)),
            hover_time: c(Time::new::<second>(120.0)),
            range: c(Length::new::<meter>(60_000.0)),
            endurance: c(Time::new::<second>(3600.0)),
            mode: MissionMode::Range,
        },
        vtol: VtolInput::new(4, 1.0, mps(2.0)).unwrap(),
        propulsion: PropulsionInput {
            max_voltage: c(ElectricPotential::new::<volt>(22.2)),
            cruise: BranchLayout {
                motors: c(1),
                propellers: c(1),
                blades: c(2),
                install_factor: c(1.2),
            },
            vtol_blades: c(2),
            vtol_install_factor: c(1.2),
        },
        battery: BatteryInput {
            specific_energy: c(AvailableEnergy::new::<joule_per_kilogram>(200.0 * 3600.0)),
            battery_efficiency: c(0.95),
            electrical_efficiency: c(0.9),
            usable_fraction: c(0.8),
            max_lift_to_drag: c(12.0),
            endurance_lift_coefficient: c(0.8),
            endurance_drag_coefficient: c(0.06),
        },
        mass: MassInput {
            payload: c(Mass::new::<kilogram>(2.0)),
            structure_fraction: c(0.35),
            avionics_fraction: c(0.05),
            subsystem_fraction: c(0.10),
        },
        limits: GeometryLimits {
            max_wingspan: c(Length::new::<meter>(4.0)),
            max_propeller_diameter: c(Length::new::<meter>(0.8)),
        },
    }
}
