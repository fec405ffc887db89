use thiserror::Error;
use uom::si::f64::Mass;

use crate::models::aircraft::hybrid_vtol::core::DomainError;

/// Errors that can occur while converging take-off mass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvergenceError {
    /// The loop reached its pass limit without converging.
    #[error("mass loop hit iteration limit: mass={mass:?}, relative change={residual}")]
    MaxIters {
        /// Estimate from the last pass.
        mass: Mass,

        /// Relative change over the last pass.
        residual: f64,

        /// Passes performed.
        iters: usize,
    },

    /// Battery and fixed fractions leave nothing for the absolute masses.
    ///
    /// Closing the budget would need a non-positive denominator, so no
    /// finite take-off mass exists.
    #[error("mass fractions sum to {sum}, at least 1")]
    FractionsExceedUnity {
        /// Sum of battery, structure, avionics and subsystem fractions.
        sum: f64,
    },

    /// A pass produced NaN or infinity.
    #[error("non-finite value in pass from {guess} kg")]
    NonFinite {
        /// Take-off mass the failing pass started from, kg.
        guess: f64,
    },

    /// A component model rejected its inputs.
    #[error("invalid model input")]
    Domain(#[from] DomainError),
}
