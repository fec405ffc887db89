//! Type-level numeric constraints with zero runtime cost.
//!
//! Sizing inputs carry physical invariants: rotor counts must be positive,
//! efficiencies live in `(0, 1]`, empty-weight fractions live in `[0, 1)`.
//! The types in this module express those invariants at the type level so a
//! model constructed from them never has to re-check its inputs.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitIntervalLowerOpen`]: Lower-open unit interval `0 < x ≤ 1`
//! - [`UnitIntervalUpperOpen`]: Upper-open unit interval `0 ≤ x < 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper,
//! where `C` is the marker type implementing [`Constraint<T>`].
//! Each marker also provides an associated `new()` constructor
//! (e.g., `StrictlyPositive::new(4_u32)`).
//!
//! # Extending
//!
//! Custom invariants are added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitIntervalLowerOpen, UnitIntervalUpperOpen};

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use twine_sizing::support::constraint::{Constrained, StrictlyPositive};
///
/// let rotors = Constrained::<u32, StrictlyPositive>::new(4).unwrap();
/// assert_eq!(rotors.into_inner(), 4);
///
/// assert!(Constrained::<u32, StrictlyPositive>::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
