use thiserror::Error;

use crate::support::constraint::{Constrained, Constraint, ConstraintError};

/// Invalid physical input.
///
/// Raised as soon as a value enters the model, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// A named input violated its numeric constraint.
    #[error("invalid {field}: {source}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,

        /// The violated constraint.
        #[source]
        source: ConstraintError,
    },

    /// Wing loading must be strictly positive and finite.
    #[error("wing loading must be positive and finite, got {0} N/m²")]
    WingLoading(f64),

    /// Power loading must be strictly positive and finite.
    #[error("power loading must be positive and finite, got {0} W/N")]
    PowerLoading(f64),

    /// A model was asked to evaluate a non-physical take-off mass.
    #[error("take-off mass must be positive and finite, got {0} kg")]
    TakeOffMass(f64),

    /// A search axis is empty or inverted.
    #[error("invalid {axis} bounds: [{lower}, {upper}] with {points} points")]
    Bounds {
        axis: &'static str,
        lower: f64,
        upper: f64,
        points: usize,
    },

    /// The cruise altitude lies below the transition altitude.
    #[error("cruise altitude {cruise} m is below transition altitude {transition} m")]
    Altitudes { transition: f64, cruise: f64 },
}

impl DomainError {
    /// Validates `value` against constraint `C`, tagging failures with `field`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the constraint is violated.
    pub fn check<T, C: Constraint<T>>(
        field: &'static str,
        value: T,
    ) -> Result<Constrained<T, C>, Self> {
        Constrained::new(value).map_err(|source| Self::InvalidInput { field, source })
    }
}

/// Returns `value` if it is strictly positive and finite.
pub(super) fn positive_finite(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
