//! Hybrid VTOL/fixed-wing conceptual sizing models.
//!
//! [`HybridVtolSizing`] owns validated inputs and solver settings and exposes
//! the three levels of the sizing problem:
//!
//! - [`HybridVtolSizing::converge`] closes the mass budget at one design point
//! - [`HybridVtolSizing::evaluate`] adds constraint margins to that
//! - [`HybridVtolSizing::size`] searches for the lightest feasible design
//!
//! [`MassClosure`] is the [`twine_core::Model`] adapter over the mass loop.
//! The component models ([`VtolPropulsion`], [`PropulsionMass`],
//! [`BatteryMass`], [`MassConvergence`] and [`FeasibleDesignSearch`]) are
//! re-exported for callers that need one stage on its own.

pub(crate) mod core;
pub mod config;

pub use self::core::{
    AerodynamicConstraints, AerodynamicsInput, Axis, BatteryFractions, BatteryInput, BatteryMass,
    BranchLayout, BranchMasses, ConstraintEvaluation, ConstraintKind, ConvergenceConfig,
    ConvergenceError, DesignPoint, DiagramRow, DiscLoadingRegression, DomainError, Evaluation,
    Extrapolation, FeasibleDesignSearch, FigureOfMeritRegression, GeometryLimits, MassBreakdown,
    MassConvergence, MassInput, MissionInput, MissionMode, MotorRegression, Pass,
    PhysicalConstants, PowerLaw, PropellerRegression, PropulsionInput, PropulsionMass,
    PropulsionMasses, PropulsionState, RefineConfig, Regressions, RequiredPowerLoading,
    SearchConfig, SearchError, SearchStats, SizingInputs, SizingResult, VtolInput, VtolPower,
    VtolPropulsion, select_best,
};
pub use config::{ConfigError, SizingConfig};

use twine_core::Model;

use crate::support::constraint::{Constrained, StrictlyPositive};

/// Sizing problem for one aircraft concept and mission.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridVtolSizing {
    inputs: SizingInputs,
    convergence: ConvergenceConfig,
    search: SearchConfig,
}

impl HybridVtolSizing {
    /// Creates a sizing problem with default solver settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the inputs are inconsistent.
    pub fn new(inputs: SizingInputs) -> Result<Self, DomainError> {
        Self::with_config(inputs, ConvergenceConfig::default(), SearchConfig::default())
    }

    /// Creates a sizing problem with explicit solver settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the cruise altitude is below the
    /// transition altitude, the convergence settings are non-positive, or a
    /// search axis is invalid.
    pub fn with_config(
        inputs: SizingInputs,
        convergence: ConvergenceConfig,
        search: SearchConfig,
    ) -> Result<Self, DomainError> {
        BatteryMass::new(
            &inputs.constants,
            &inputs.aerodynamics,
            &inputs.mission,
            &inputs.battery,
            &inputs.vtol,
        )?;
        let _: Constrained<_, StrictlyPositive> =
            DomainError::check("initial_guess", convergence.initial_guess)?;
        let _: Constrained<_, StrictlyPositive> =
            DomainError::check("tolerance", convergence.tolerance)?;
        search.validate()?;

        Ok(Self {
            inputs,
            convergence,
            search,
        })
    }

    #[must_use]
    pub fn inputs(&self) -> &SizingInputs {
        &self.inputs
    }

    #[must_use]
    pub fn convergence_config(&self) -> &ConvergenceConfig {
        &self.convergence
    }

    #[must_use]
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Aerodynamic constraint model for these inputs.
    #[must_use]
    pub fn aerodynamics(&self) -> AerodynamicConstraints<'_> {
        AerodynamicConstraints::new(
            &self.inputs.constants,
            &self.inputs.aerodynamics,
            &self.inputs.mission,
        )
    }

    /// Converges take-off mass at one design point.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvergenceError`] if the mass loop fails.
    pub fn converge(&self, point: DesignPoint) -> Result<MassBreakdown, ConvergenceError> {
        MassConvergence::new(&self.inputs, self.convergence).solve(point)
    }

    /// Converges one design point and checks every constraint.
    #[must_use]
    pub fn evaluate(&self, point: DesignPoint) -> Evaluation {
        FeasibleDesignSearch::new(&self.inputs, self.convergence, &self.search).evaluate(point)
    }

    /// Finds the lightest feasible design.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InfeasibleDesignSpace`] if no design meets every
    /// constraint.
    pub fn size(&self) -> Result<SizingResult, SearchError> {
        FeasibleDesignSearch::new(&self.inputs, self.convergence, &self.search).run()
    }

    /// The mass loop as a [`Model`].
    #[must_use]
    pub fn mass_closure(&self) -> MassClosure<'_> {
        MassClosure { sizing: self }
    }
}

/// Converged mass budget as a function of design point.
#[derive(Debug, Clone, Copy)]
pub struct MassClosure<'a> {
    sizing: &'a HybridVtolSizing,
}

impl Model for MassClosure<'_> {
    type Input = DesignPoint;
    type Output = MassBreakdown;
    type Error = ConvergenceError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.sizing.converge(*input)
    }
}
