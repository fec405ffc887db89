//! Normalised constraint margins.
//!
//! Every margin is `(limit - value) / limit` for upper limits or
//! `(value - required) / required` for lower limits, so constraints with
//! different units can be compared. Non-negative means satisfied.

use std::fmt;

/// A design constraint checked by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Wing loading at or below the stall limit.
    Stall,
    CruisePower,
    ClimbPower,
    CeilingPower,
    Wingspan,
    CruisePropellerDiameter,
    VtolPropellerDiameter,

    /// The mass loop failed to converge.
    MassClosure,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stall => "stall speed",
            Self::CruisePower => "cruise power",
            Self::ClimbPower => "climb power",
            Self::CeilingPower => "service ceiling power",
            Self::Wingspan => "wingspan",
            Self::CruisePropellerDiameter => "cruise propeller diameter",
            Self::VtolPropellerDiameter => "VTOL propeller diameter",
            Self::MassClosure => "mass closure",
        })
    }
}

/// Margin of one constraint at one design point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintEvaluation {
    pub kind: ConstraintKind,
    pub margin: f64,
}

impl ConstraintEvaluation {
    /// `value` must not exceed `limit`.
    pub(crate) fn upper(kind: ConstraintKind, limit: f64, value: f64) -> Self {
        Self {
            kind,
            margin: (limit - value) / limit,
        }
    }

    /// `value` must reach at least `required`.
    pub(crate) fn lower(kind: ConstraintKind, required: f64, value: f64) -> Self {
        Self {
            kind,
            margin: (value - required) / required,
        }
    }

    /// Whether the margin is at least `-epsilon`. NaN margins never pass.
    #[must_use]
    pub fn is_satisfied(&self, epsilon: f64) -> bool {
        self.margin >= -epsilon
    }
}

/// Wingspan from aspect ratio and wing area, `sqrt(AR · W / (W/S))` m.
pub(crate) fn wingspan(aspect_ratio: f64, weight: f64, wing_loading: f64) -> f64 {
    (aspect_ratio * weight / wing_loading).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn margins_are_normalised() {
        let stall = ConstraintEvaluation::upper(ConstraintKind::Stall, 115.0, 92.0);
        assert_relative_eq!(stall.margin, 0.2);
        assert!(stall.is_satisfied(0.0));

        let climb = ConstraintEvaluation::lower(ConstraintKind::ClimbPower, 5.0, 4.5);
        assert_relative_eq!(climb.margin, -0.1);
        assert!(!climb.is_satisfied(0.0));
        assert!(climb.is_satisfied(0.1 + 1e-12));
    }

    #[test]
    fn nan_margin_is_never_satisfied() {
        let bad = ConstraintEvaluation {
            kind: ConstraintKind::Wingspan,
            margin: f64::NAN,
        };
        assert!(!bad.is_satisfied(1.0));
    }

    #[test]
    fn wingspan_from_area() {
        // 100 N at 100 N/m² is 1 m², so AR 9 gives a 3 m span.
        assert_relative_eq!(wingspan(9.0, 100.0, 100.0), 3.0);
    }
}
