//! Aircraft sizing models.
//!
//! Conceptual sizing of small electric aircraft from mission requirements,
//! down to a converged take-off mass and the geometry that goes with it.

pub mod hybrid_vtol;
