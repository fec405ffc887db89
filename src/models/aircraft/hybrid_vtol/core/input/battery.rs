use uom::si::{available_energy::joule_per_kilogram, f64::AvailableEnergy};

use crate::support::constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen};

/// Battery technology and the cruise aerodynamics used for energy sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryInput {
    /// Cell-level specific energy.
    pub specific_energy: Constrained<AvailableEnergy, StrictlyPositive>,

    /// Discharge efficiency of the pack.
    pub battery_efficiency: Constrained<f64, UnitIntervalLowerOpen>,

    /// Efficiency from pack terminals to shaft (ESC and motor).
    pub electrical_efficiency: Constrained<f64, UnitIntervalLowerOpen>,

    /// Fraction of capacity that may be drawn.
    pub usable_fraction: Constrained<f64, UnitIntervalLowerOpen>,

    /// Maximum lift-to-drag ratio, flown for range.
    pub max_lift_to_drag: Constrained<f64, StrictlyPositive>,

    /// Lift coefficient at the minimum-power (endurance) condition.
    pub endurance_lift_coefficient: Constrained<f64, StrictlyPositive>,

    /// Drag coefficient at the minimum-power (endurance) condition.
    pub endurance_drag_coefficient: Constrained<f64, StrictlyPositive>,
}

impl BatteryInput {
    /// Energy usable at the shaft per kilogram of battery, J/kg.
    pub(crate) fn effective_specific_energy(&self) -> f64 {
        self.specific_energy.as_ref().get::<joule_per_kilogram>()
            * self.battery_efficiency.get()
            * self.electrical_efficiency.get()
            * self.usable_fraction.get()
    }
}
