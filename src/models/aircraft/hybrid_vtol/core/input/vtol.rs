use uom::si::{f64::Velocity, velocity::meter_per_second};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

use super::super::DomainError;

/// Lift-rotor layout and vertical climb requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VtolInput {
    /// Number of lift rotors.
    pub rotor_count: Constrained<u32, StrictlyPositive>,

    /// Ratio of wing area projected into the rotor downwash to wing area.
    pub projected_area_ratio: Constrained<f64, NonNegative>,

    /// Vertical rate of climb in VTOL mode.
    pub rate_of_climb: Constrained<Velocity, StrictlyPositive>,
}

impl VtolInput {
    /// Constructs a validated VTOL input.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if there are no rotors, the projected area
    /// ratio is negative, or the climb rate is not strictly positive.
    pub fn new(
        rotor_count: u32,
        projected_area_ratio: f64,
        rate_of_climb: Velocity,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            rotor_count: DomainError::check("rotor_count", rotor_count)?,
            projected_area_ratio: DomainError::check("projected_area_ratio", projected_area_ratio)?,
            rate_of_climb: DomainError::check("vtol_rate_of_climb", rate_of_climb)?,
        })
    }

    pub(crate) fn rotors(&self) -> f64 {
        f64::from(self.rotor_count.get())
    }

    pub(crate) fn roc(&self) -> f64 {
        self.rate_of_climb.as_ref().get::<meter_per_second>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn zero_rotors_is_a_domain_error() {
        let err = VtolInput::new(0, 1.0, Velocity::new::<meter_per_second>(2.0)).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidInput {
                field: "rotor_count",
                source: ConstraintError::Zero,
            }
        );
    }

    #[test]
    fn accepts_quad_layout() {
        let vtol = VtolInput::new(4, 0.8, Velocity::new::<meter_per_second>(2.0)).unwrap();
        assert_eq!(vtol.rotor_count.get(), 4);
    }
}
