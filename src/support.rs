//! Crate-level utilities shared across model domains.

pub mod constraint;
