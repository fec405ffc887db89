//! Typed, validated inputs for the sizing models.
//!
//! Each record covers one component boundary. Fields hold [`Constrained`]
//! values, so a record that exists is already physically valid.
//!
//! [`Constrained`]: crate::support::constraint::Constrained

mod aerodynamics;
mod battery;
mod limits;
mod mass;
mod mission;
mod propulsion;
mod vtol;

pub use aerodynamics::AerodynamicsInput;
pub use battery::BatteryInput;
pub use limits::GeometryLimits;
pub use mass::MassInput;
pub use mission::{MissionInput, MissionMode};
pub use propulsion::{BranchLayout, PropulsionInput};
pub use vtol::VtolInput;

use super::PhysicalConstants;

/// Everything the solver needs to know about the aircraft and its mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInputs {
    pub constants: PhysicalConstants,
    pub aerodynamics: AerodynamicsInput,
    pub mission: MissionInput,
    pub vtol: VtolInput,
    pub propulsion: PropulsionInput,
    pub battery: BatteryInput,
    pub mass: MassInput,
    pub limits: GeometryLimits,
}
