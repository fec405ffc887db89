use thiserror::Error;

use crate::models::aircraft::hybrid_vtol::core::DomainError;

use super::ConstraintKind;

/// Errors that can occur during the design search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// No grid point meets every constraint.
    ///
    /// Reports the binding constraint of the least-infeasible point.
    #[error("no feasible design: {constraint} violated with margin {margin:.4}")]
    InfeasibleDesignSpace {
        constraint: ConstraintKind,

        /// Normalised margin of that constraint, negative.
        margin: f64,
    },

    /// The search configuration is invalid.
    #[error("invalid search configuration")]
    Domain(#[from] DomainError),
}
