use std::{cmp::Ordering, marker::PhantomData};

use crate::support::constraint::{Constrained, Constraint, ConstraintError, UnitBounds};

/// Marker type enforcing that a value lies in the right-open unit interval: `0 ≤ x < 1`.
///
/// Empty-weight fractions live here. A single fraction of one would leave no
/// mass for anything else, so it is rejected up front; whether the *sum* of
/// fractions stays below one is checked by the mass convergence loop.
///
/// # Examples
///
/// ```
/// use twine_sizing::support::constraint::{Constrained, UnitIntervalUpperOpen};
///
/// let structure = Constrained::<_, UnitIntervalUpperOpen>::new(0.35).unwrap();
/// assert_eq!(structure.into_inner(), 0.35);
///
/// let none = UnitIntervalUpperOpen::zero::<f64>();
/// assert_eq!(none.into_inner(), 0.0);
///
/// assert!(UnitIntervalUpperOpen::new(1.0).is_err());
/// assert!(UnitIntervalUpperOpen::new(-0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalUpperOpen;

impl UnitIntervalUpperOpen {
    /// Constructs `Constrained<T, UnitIntervalUpperOpen>` if 0 ≤ value < 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalUpperOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalUpperOpen>::new(value)
    }

    /// Returns the lower bound (zero) as a constrained value.
    #[must_use]
    pub fn zero<T: UnitBounds>() -> Constrained<T, UnitIntervalUpperOpen> {
        Constrained::<T, UnitIntervalUpperOpen> {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalUpperOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
