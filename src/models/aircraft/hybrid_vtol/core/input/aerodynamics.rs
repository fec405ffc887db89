use std::f64::consts::PI;

use crate::support::constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen};

/// Wing and propeller aerodynamics for a parabolic drag polar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicsInput {
    /// Oswald span efficiency `e`.
    pub oswald_efficiency: Constrained<f64, UnitIntervalLowerOpen>,

    /// Wing aspect ratio `AR`.
    pub aspect_ratio: Constrained<f64, StrictlyPositive>,

    /// Maximum lift coefficient `CL_max`.
    pub max_lift_coefficient: Constrained<f64, StrictlyPositive>,

    /// Zero-lift drag coefficient `CD0`.
    pub zero_lift_drag: Constrained<f64, StrictlyPositive>,

    /// Cruise propeller efficiency.
    pub propeller_efficiency: Constrained<f64, UnitIntervalLowerOpen>,
}

impl AerodynamicsInput {
    /// Induced drag factor `k = 1 / (π·e·AR)`.
    pub(crate) fn induced_drag_factor(&self) -> f64 {
        1.0 / (PI * self.oswald_efficiency.get() * self.aspect_ratio.get())
    }
}
