use uom::si::{f64::Mass, mass::kilogram};

use crate::support::constraint::{Constrained, NonNegative, UnitIntervalUpperOpen};

/// Payload and the empty-weight fractions held fixed during sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassInput {
    pub payload: Constrained<Mass, NonNegative>,
    pub structure_fraction: Constrained<f64, UnitIntervalUpperOpen>,
    pub avionics_fraction: Constrained<f64, UnitIntervalUpperOpen>,
    pub subsystem_fraction: Constrained<f64, UnitIntervalUpperOpen>,
}

impl MassInput {
    pub(crate) fn payload_kg(&self) -> f64 {
        self.payload.as_ref().get::<kilogram>()
    }

    /// Sum of the fixed empty-weight fractions.
    pub(crate) fn fixed_fractions(&self) -> f64 {
        self.structure_fraction.get() + self.avionics_fraction.get() + self.subsystem_fraction.get()
    }
}
