use uom::si::{f64::Length, length::meter};

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Geometric limits checked against each converged design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryLimits {
    pub max_wingspan: Constrained<Length, StrictlyPositive>,

    /// Applies to both the cruise and the lift propellers.
    pub max_propeller_diameter: Constrained<Length, StrictlyPositive>,
}

impl GeometryLimits {
    pub(crate) fn span_m(&self) -> f64 {
        self.max_wingspan.as_ref().get::<meter>()
    }

    pub(crate) fn diameter_m(&self) -> f64 {
        self.max_propeller_diameter.as_ref().get::<meter>()
    }
}
