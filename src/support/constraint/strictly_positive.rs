use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Used for counts that divide something (rotors, motors, propellers) and for
/// physical quantities that are meaningless at zero (speeds, densities,
/// specific energy).
///
/// # Examples
///
/// ```
/// use twine_sizing::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Velocity, velocity::meter_per_second};
///
/// let rotors = StrictlyPositive::new(4_u32).unwrap();
/// assert_eq!(rotors.into_inner(), 4);
///
/// let v_cruise = Constrained::<_, StrictlyPositive>::new(
///     Velocity::new::<meter_per_second>(25.0),
/// )
/// .unwrap();
/// assert_eq!(v_cruise.as_ref().get::<meter_per_second>(), 25.0);
///
/// assert!(StrictlyPositive::new(0_u32).is_err());
/// assert!(StrictlyPositive::new(-13.8).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
