use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    time::second,
    velocity::meter_per_second,
};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

/// Which cruise segment the battery is sized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissionMode {
    /// Fly a fixed distance at best L/D.
    #[default]
    Range,
    /// Loiter for a fixed time at minimum power.
    Endurance,
}

/// Speeds, climb requirements and segment lengths of the design mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionInput {
    /// Cruise airspeed.
    pub cruise_speed: Constrained<Velocity, StrictlyPositive>,

    /// Stall speed at the design density.
    pub stall_speed: Constrained<Velocity, StrictlyPositive>,

    /// Fixed-wing climb rate `R_C`, used by the climb constraint and the
    /// battery climb segment.
    pub cruise_climb_rate: Constrained<Velocity, StrictlyPositive>,

    /// Climb rate still available at the service ceiling.
    pub ceiling_climb_rate: Constrained<Velocity, NonNegative>,

    /// Altitude at which the aircraft transitions from VTOL to wing-borne flight.
    pub transition_altitude: Constrained<Length, NonNegative>,

    /// Cruise altitude reached by the fixed-wing climb.
    pub cruise_altitude: Constrained<Length, NonNegative>,

    /// Total hover time.
    pub hover_time: Constrained<Time, NonNegative>,

    /// Cruise distance for [`MissionMode::Range`].
    pub range: Constrained<Length, NonNegative>,

    /// Loiter time for [`MissionMode::Endurance`].
    pub endurance: Constrained<Time, NonNegative>,

    pub mode: MissionMode,
}

impl MissionInput {
    pub(crate) fn v_cruise(&self) -> f64 {
        self.cruise_speed.as_ref().get::<meter_per_second>()
    }

    pub(crate) fn v_stall(&self) -> f64 {
        self.stall_speed.as_ref().get::<meter_per_second>()
    }

    pub(crate) fn rate_of_climb(&self) -> f64 {
        self.cruise_climb_rate.as_ref().get::<meter_per_second>()
    }

    pub(crate) fn ceiling_rate_of_climb(&self) -> f64 {
        self.ceiling_climb_rate.as_ref().get::<meter_per_second>()
    }

    pub(crate) fn h_start(&self) -> f64 {
        self.transition_altitude.as_ref().get::<meter>()
    }

    pub(crate) fn h_end(&self) -> f64 {
        self.cruise_altitude.as_ref().get::<meter>()
    }

    pub(crate) fn t_hover(&self) -> f64 {
        self.hover_time.as_ref().get::<second>()
    }

    pub(crate) fn range_m(&self) -> f64 {
        self.range.as_ref().get::<meter>()
    }

    pub(crate) fn endurance_s(&self) -> f64 {
        self.endurance.as_ref().get::<second>()
    }
}
