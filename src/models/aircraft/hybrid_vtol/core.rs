//! Conceptual sizing of a hybrid VTOL/fixed-wing aircraft.
//!
//! Components are layered leaf first:
//!
//! - [`aero`]: stall limit and required power loadings
//! - [`vtol`]: lift-rotor thrust and power from momentum theory
//! - [`propulsion`]: motor, ESC and propeller masses
//! - [`battery`]: battery mass fractions per mission segment
//! - [`converge`]: fixed-point iteration on take-off mass
//! - [`search`]: constrained grid search with boundary refinement
//!
//! Every component receives the same [`PhysicalConstants`] by reference.

mod aero;
mod battery;
mod constants;
mod converge;
mod design_point;
mod error;
mod input;
mod propulsion;
mod results;
mod search;
mod vtol;

#[cfg(test)]
mod test_support;

pub use aero::{AerodynamicConstraints, DiagramRow, RequiredPowerLoading};
pub use battery::{BatteryFractions, BatteryMass};
pub use constants::{
    DiscLoadingRegression, FigureOfMeritRegression, MotorRegression, PhysicalConstants, PowerLaw,
    PropellerRegression, Regressions,
};
pub use converge::{ConvergenceConfig, ConvergenceError, MassConvergence, Pass};
pub use design_point::DesignPoint;
pub use error::DomainError;
pub use input::{
    AerodynamicsInput, BatteryInput, BranchLayout, GeometryLimits, MassInput, MissionInput,
    MissionMode, PropulsionInput, SizingInputs, VtolInput,
};
pub use propulsion::{BranchMasses, PropulsionMass};
pub use results::{
    Extrapolation, MassBreakdown, PropulsionMasses, PropulsionState, SearchStats, SizingResult,
};
pub use search::{
    Axis, ConstraintEvaluation, ConstraintKind, Evaluation, FeasibleDesignSearch, RefineConfig,
    SearchConfig, SearchError, select_best,
};
pub use vtol::{VtolPower, VtolPropulsion};
