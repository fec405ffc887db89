use crate::models::aircraft::hybrid_vtol::core::{DesignPoint, DomainError};

use super::SearchConfig;

/// The rectangular grid of candidate design points.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Grid {
    wing_loadings: Vec<f64>,
    power_loadings: Vec<f64>,
}

impl Grid {
    pub(super) fn new(config: &SearchConfig) -> Result<Self, DomainError> {
        Ok(Self {
            wing_loadings: config.wing_loading.values("wing_loading")?,
            power_loadings: config.power_loading.values("power_loading")?,
        })
    }

    /// All points, wing loading major.
    pub(super) fn points(&self) -> Vec<DesignPoint> {
        self.wing_loadings
            .iter()
            .flat_map(|&ws| {
                self.power_loadings
                    .iter()
                    .map(move |&pl| DesignPoint::new_unchecked(ws, pl))
            })
            .collect()
    }

    /// Grid wing loadings adjacent to `wing_loading`.
    pub(super) fn wing_loading_neighbors(&self, wing_loading: f64) -> Vec<f64> {
        let Some(i) = self.wing_loadings.iter().position(|&ws| ws == wing_loading) else {
            return Vec::new();
        };
        [i.checked_sub(1), Some(i + 1)]
            .into_iter()
            .flatten()
            .filter_map(|j| self.wing_loadings.get(j).copied())
            .collect()
    }

    pub(super) fn min_power_loading(&self) -> f64 {
        self.power_loadings[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::aircraft::hybrid_vtol::core::Axis;

    fn small() -> Grid {
        Grid::new(&SearchConfig {
            wing_loading: Axis::new(50.0, 150.0, 3),
            power_loading: Axis::new(2.0, 6.0, 5),
            ..SearchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn points_cover_the_rectangle() {
        let points = small().points();
        assert_eq!(points.len(), 15);
        assert_eq!(points[0], DesignPoint::new(50.0, 2.0).unwrap());
        assert_eq!(points[14], DesignPoint::new(150.0, 6.0).unwrap());
    }

    #[test]
    fn neighbors_stop_at_the_edges() {
        let grid = small();
        assert_eq!(grid.wing_loading_neighbors(50.0), vec![100.0]);
        assert_eq!(grid.wing_loading_neighbors(100.0), vec![50.0, 150.0]);
        assert_eq!(grid.wing_loading_neighbors(150.0), vec![100.0]);
        assert!(grid.wing_loading_neighbors(75.0).is_empty());
    }
}
