use uom::si::{electric_potential::volt, f64::ElectricPotential};

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Motor and propeller counts for one propulsion branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLayout {
    pub motors: Constrained<u32, StrictlyPositive>,
    pub propellers: Constrained<u32, StrictlyPositive>,
    pub blades: Constrained<u32, StrictlyPositive>,

    /// Multiplier covering mounts, wiring and fasteners.
    pub install_factor: Constrained<f64, StrictlyPositive>,
}

/// Electrical and layout data for the cruise and VTOL propulsion branches.
///
/// The VTOL branch has one motor and one propeller per lift rotor, so only
/// its blade count and install factor are given here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionInput {
    /// Maximum pack voltage `U_max`.
    pub max_voltage: Constrained<ElectricPotential, StrictlyPositive>,

    pub cruise: BranchLayout,

    pub vtol_blades: Constrained<u32, StrictlyPositive>,

    pub vtol_install_factor: Constrained<f64, StrictlyPositive>,
}

impl PropulsionInput {
    pub(crate) fn voltage(&self) -> f64 {
        self.max_voltage.as_ref().get::<volt>()
    }

    /// Layout of the VTOL branch for the given rotor count.
    pub(crate) fn vtol_layout(&self, rotors: Constrained<u32, StrictlyPositive>) -> BranchLayout {
        BranchLayout {
            motors: rotors,
            propellers: rotors,
            blades: self.vtol_blades,
            install_factor: self.vtol_install_factor,
        }
    }
}
