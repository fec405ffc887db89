use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// Used for quantities where zero is a legitimate choice, such as payload
/// mass, hover time, or a service-ceiling climb requirement.
///
/// # Examples
///
/// ```
/// use twine_sizing::support::constraint::{Constrained, NonNegative};
///
/// let hover_s = Constrained::<_, NonNegative>::new(120.0).unwrap();
/// assert_eq!(hover_s.into_inner(), 120.0);
///
/// let no_payload = NonNegative::zero::<f64>();
/// assert_eq!(no_payload.into_inner(), 0.0);
///
/// assert!(NonNegative::new(-1.0).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(2.0).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert!(matches!(
            NonNegative::new(-2.0),
            Err(ConstraintError::Negative)
        ));
        assert!(matches!(
            NonNegative::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }

    #[test]
    fn masses() {
        assert!(NonNegative::new(Mass::new::<kilogram>(2.5)).is_ok());
        assert!(NonNegative::new(Mass::new::<kilogram>(0.0)).is_ok());
        assert!(NonNegative::new(Mass::new::<kilogram>(-0.1)).is_err());

        let zero = NonNegative::zero::<Mass>();
        assert_eq!(zero.into_inner().get::<kilogram>(), 0.0);
    }
}
