use uom::si::{f64::Mass, mass::kilogram};

/// Settings for the take-off mass fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceConfig {
    /// Take-off mass used for the first pass.
    pub initial_guess: Mass,

    /// Relative change in take-off mass below which the loop stops.
    pub tolerance: f64,

    /// Maximum number of passes.
    pub max_iters: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            initial_guess: Mass::new::<kilogram>(30.0),
            tolerance: 1e-3,
            max_iters: 20,
        }
    }
}
