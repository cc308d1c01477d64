//! Algorithm selection policies.
//!
//! A policy picks zero or one algorithm id out of a project's registered
//! set. Selection is stateless and re-evaluated on every call; the weighted
//! variant draws through an injectable random source so tests can replay
//! selections deterministically.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rule for choosing which registered algorithm handles a request when none
/// is named explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlgorithmPolicy {
    /// Never selects anything
    NoAlgorithm,
    /// Always the named algorithm, as long as it is still registered
    DefaultAlgorithm(String),
    /// Weighted random draw over (algorithm id, positive weight) entries.
    /// Declaration order breaks ties, so the entries stay a vec rather than
    /// a map.
    Weighted(Vec<(String, f64)>),
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        AlgorithmPolicy::NoAlgorithm
    }
}

/// Abstracted randomness provider for weighted selection
pub trait RandomSource: Send + Sync {
    /// Uniform draw from [0, 1)
    fn draw(&self) -> f64;
}

/// Default random source backed by the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Select an algorithm id from `available` according to `policy`.
///
/// `DefaultAlgorithm` yields `None` when its target has been deleted from
/// the project since the policy was set; the weighted draw restricts itself
/// to entries that are both weighted and still available and yields `None`
/// when that intersection is empty.
pub fn select(
    policy: &AlgorithmPolicy,
    available: &[String],
    rng: &dyn RandomSource,
) -> Option<String> {
    match policy {
        AlgorithmPolicy::NoAlgorithm => None,
        AlgorithmPolicy::DefaultAlgorithm(id) => {
            if available.iter().any(|a| a == id) {
                Some(id.clone())
            } else {
                None
            }
        }
        AlgorithmPolicy::Weighted(weights) => {
            let candidates: Vec<(&String, f64)> = weights
                .iter()
                .filter(|(id, weight)| *weight > 0.0 && available.iter().any(|a| a == id))
                .map(|(id, weight)| (id, *weight))
                .collect();

            let total: f64 = candidates.iter().map(|(_, w)| w).sum();
            if total <= 0.0 {
                return None;
            }

            let target = rng.draw() * total;
            let mut cumulative = 0.0;
            for (id, weight) in &candidates {
                cumulative += weight;
                if target < cumulative {
                    return Some((*id).clone());
                }
            }
            // Rounding can leave the target at the upper bound; fall back to
            // the last candidate.
            candidates.last().map(|(id, _)| (*id).clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed sequence of draws
    struct ScriptedSource {
        draws: Vec<f64>,
        next: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(draws: Vec<f64>) -> Self {
            Self {
                draws,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn draw(&self) -> f64 {
            let i = self.next.fetch_add(1, Ordering::Relaxed);
            self.draws[i % self.draws.len()]
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_algorithm_always_none() {
        let rng = ThreadRngSource;
        assert_eq!(select(&AlgorithmPolicy::NoAlgorithm, &[], &rng), None);
        assert_eq!(
            select(&AlgorithmPolicy::NoAlgorithm, &ids(&["a", "b"]), &rng),
            None
        );
    }

    #[test]
    fn test_default_algorithm_requires_presence() {
        let rng = ThreadRngSource;
        let policy = AlgorithmPolicy::DefaultAlgorithm("a".to_string());
        assert_eq!(
            select(&policy, &ids(&["a", "b"]), &rng),
            Some("a".to_string())
        );
        // The target may have been deleted after the policy was set.
        assert_eq!(select(&policy, &ids(&["b"]), &rng), None);
        assert_eq!(select(&policy, &[], &rng), None);
    }

    #[test]
    fn test_weighted_empty_intersection_is_none() {
        let rng = ThreadRngSource;
        let policy = AlgorithmPolicy::Weighted(vec![("a".to_string(), 1.0)]);
        assert_eq!(select(&policy, &ids(&["b", "c"]), &rng), None);
        assert_eq!(select(&AlgorithmPolicy::Weighted(vec![]), &ids(&["b"]), &rng), None);
    }

    #[test]
    fn test_weighted_skips_non_positive_weights() {
        let rng = ScriptedSource::new(vec![0.0, 0.5, 0.99]);
        let policy = AlgorithmPolicy::Weighted(vec![
            ("a".to_string(), 0.0),
            ("b".to_string(), 1.0),
        ]);
        for _ in 0..3 {
            assert_eq!(select(&policy, &ids(&["a", "b"]), &rng), Some("b".to_string()));
        }
    }

    #[test]
    fn test_weighted_scripted_selection() {
        let policy = AlgorithmPolicy::Weighted(vec![
            ("a".to_string(), 3.0),
            ("b".to_string(), 1.0),
        ]);
        let available = ids(&["a", "b"]);

        // Cumulative bounds: a covers [0, 3), b covers [3, 4).
        let rng = ScriptedSource::new(vec![0.0]);
        assert_eq!(select(&policy, &available, &rng), Some("a".to_string()));
        let rng = ScriptedSource::new(vec![0.74]);
        assert_eq!(select(&policy, &available, &rng), Some("a".to_string()));
        let rng = ScriptedSource::new(vec![0.75]);
        assert_eq!(select(&policy, &available, &rng), Some("b".to_string()));
        let rng = ScriptedSource::new(vec![0.999]);
        assert_eq!(select(&policy, &available, &rng), Some("b".to_string()));
    }

    #[test]
    fn test_weighted_restricts_to_available() {
        let policy = AlgorithmPolicy::Weighted(vec![
            ("a".to_string(), 100.0),
            ("b".to_string(), 1.0),
        ]);
        // With "a" gone, every draw lands on "b".
        let rng = ScriptedSource::new(vec![0.01, 0.5, 0.99]);
        for _ in 0..3 {
            assert_eq!(select(&policy, &ids(&["b"]), &rng), Some("b".to_string()));
        }
    }

    #[test]
    fn test_weighted_empirical_ratio() {
        let policy = AlgorithmPolicy::Weighted(vec![
            ("a".to_string(), 3.0),
            ("b".to_string(), 1.0),
        ]);
        let available = ids(&["a", "b"]);
        let rng = ThreadRngSource;

        let draws = 10_000;
        let mut hits_a = 0usize;
        for _ in 0..draws {
            match select(&policy, &available, &rng).as_deref() {
                Some("a") => hits_a += 1,
                Some("b") => {}
                other => panic!("unexpected selection: {:?}", other),
            }
        }

        // Expected ratio 0.75; ±0.02 is well beyond 4 standard deviations
        // at 10k draws.
        let ratio = hits_a as f64 / draws as f64;
        assert!(
            (ratio - 0.75).abs() < 0.02,
            "empirical ratio {} too far from 0.75",
            ratio
        );
    }
}
