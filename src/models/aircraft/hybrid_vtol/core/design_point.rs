use super::{DomainError, error::positive_finite};

/// A candidate pair of design variables.
///
/// Wing loading is take-off weight over wing area (N/m²).
/// Power loading is installed cruise power over take-off weight (W/N).
/// Both are guaranteed strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPoint {
    wing_loading: f64,
    power_loading: f64,
}

impl DesignPoint {
    /// Constructs a validated design point.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if either loading is non-positive or not finite.
    pub fn new(wing_loading: f64, power_loading: f64) -> Result<Self, DomainError> {
        let wing_loading =
            positive_finite(wing_loading).ok_or(DomainError::WingLoading(wing_loading))?;
        let power_loading =
            positive_finite(power_loading).ok_or(DomainError::PowerLoading(power_loading))?;
        Ok(Self {
            wing_loading,
            power_loading,
        })
    }

    /// Constructs a design point without validation.
    ///
    /// # Warning
    ///
    /// The caller must ensure both loadings are strictly positive and finite.
    #[must_use]
    pub(crate) fn new_unchecked(wing_loading: f64, power_loading: f64) -> Self {
        Self {
            wing_loading,
            power_loading,
        }
    }

    /// Wing loading in N/m².
    #[must_use]
    pub fn wing_loading(&self) -> f64 {
        self.wing_loading
    }

    /// Power loading in W/N.
    #[must_use]
    pub fn power_loading(&self) -> f64 {
        self.power_loading
    }

    /// Returns this point with a different wing loading.
    pub(crate) fn with_wing_loading(self, wing_loading: f64) -> Self {
        Self {
            wing_loading,
            ..self
        }
    }

    /// Returns this point with a different power loading.
    pub(crate) fn with_power_loading(self, power_loading: f64) -> Self {
        Self {
            power_loading,
            ..self
        }
    }
}
