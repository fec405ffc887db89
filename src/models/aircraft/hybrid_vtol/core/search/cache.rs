use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::models::aircraft::hybrid_vtol::core::DesignPoint;

use super::Evaluation;

/// Resolution of the cache key, in the units of each loading.
const KEY_RESOLUTION: f64 = 1e-9;

type Key = (i64, i64);

/// Evaluations keyed by rounded design point, shared across rayon workers.
#[derive(Debug, Default)]
pub(super) struct EvaluationCache {
    entries: Mutex<HashMap<Key, Evaluation>>,
    hits: AtomicUsize,
}

impl EvaluationCache {
    /// Returns the cached evaluation of `point`, computing it on a miss.
    ///
    /// The lock is not held while `evaluate` runs, so two workers may race
    /// on the same point; the first insert wins.
    pub(super) fn get_or_evaluate(
        &self,
        point: DesignPoint,
        evaluate: impl FnOnce() -> Evaluation,
    ) -> Evaluation {
        let key = key(point);
        if let Some(found) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return found.clone();
        }

        let evaluation = evaluate();
        self.lock()
            .entry(key)
            .or_insert_with(|| evaluation.clone());
        evaluation
    }

    /// Number of distinct points evaluated.
    pub(super) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(super) fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Key, Evaluation>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn key(point: DesignPoint) -> Key {
    (
        (point.wing_loading() / KEY_RESOLUTION).round() as i64,
        (point.power_loading() / KEY_RESOLUTION).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_a_key() {
        let a = DesignPoint::new(110.0, 5.0).unwrap();
        let b = DesignPoint::new(110.0 + 1e-12, 5.0 - 1e-12).unwrap();
        let c = DesignPoint::new(110.0 + 1e-6, 5.0).unwrap();

        assert_eq!(key(a), key(b));
        assert_ne!(key(a), key(c));
    }
}
