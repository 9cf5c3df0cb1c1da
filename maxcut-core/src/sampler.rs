//! Shot sampling from a measurement distribution

use std::collections::BTreeMap;

use ndarray::Array1;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{MaxCutError, Result};

/// Outcome counts of a sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCounts {
    shots: usize,
    counts: BTreeMap<u64, usize>,
}

impl SampleCounts {
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Observed states in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    pub fn count(&self, state: u64) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }

    /// Number of distinct states observed
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Observed frequency of a state
    pub fn frequency(&self, state: u64) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(state) as f64 / self.shots as f64
    }

    /// Mean of `value` over all shots
    pub fn mean<F: Fn(u64) -> f64>(&self, value: F) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.iter()
            .map(|(s, c)| value(s) * c as f64)
            .sum::<f64>()
            / self.shots as f64
    }

    /// Observed state minimising `energy`; ties go to the more frequent
    /// state, then to the lower index
    pub fn best_by<F: Fn(u64) -> f64>(&self, energy: F) -> Option<(u64, usize)> {
        self.iter().min_by(|&(sa, ca), &(sb, cb)| {
            energy(sa)
                .total_cmp(&energy(sb))
                .then(cb.cmp(&ca))
                .then(sa.cmp(&sb))
        })
    }
}

/// Draw `shots` basis states from `probabilities` with a seeded RNG
pub fn sample_counts(probabilities: &Array1<f64>, shots: usize, seed: u64) -> Result<SampleCounts> {
    let dist = WeightedIndex::new(probabilities.iter().copied())
        .map_err(|e| MaxCutError::SolverFailed(format!("invalid measurement distribution: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        *counts.entry(dist.sample(&mut rng) as u64).or_insert(0) += 1;
    }

    Ok(SampleCounts { shots, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mass() {
        let probs = Array1::from(vec![0.0, 0.0, 1.0, 0.0]);
        let counts = sample_counts(&probs, 100, 1).unwrap();

        assert_eq!(counts.count(2), 100);
        assert_eq!(counts.distinct(), 1);
        assert_eq!(counts.frequency(2), 1.0);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let probs = Array1::from(vec![0.1, 0.2, 0.3, 0.4]);
        let a = sample_counts(&probs, 500, 42).unwrap();
        let b = sample_counts(&probs, 500, 42).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.iter().map(|(_, c)| c).sum::<usize>(), 500);
    }

    #[test]
    fn test_frequencies_follow_distribution() {
        let probs = Array1::from(vec![0.75, 0.25]);
        let counts = sample_counts(&probs, 4000, 7).unwrap();
        assert!((counts.frequency(0) - 0.75).abs() < 0.05);
    }

    #[test]
    fn test_zero_distribution_fails() {
        let probs = Array1::from(vec![0.0, 0.0]);
        assert!(matches!(
            sample_counts(&probs, 10, 0),
            Err(MaxCutError::SolverFailed(_))
        ));
    }

    #[test]
    fn test_best_by_tie_breaks() {
        let counts = SampleCounts {
            shots: 10,
            counts: BTreeMap::from([(1, 2), (2, 5), (3, 3), (4, 5)]),
        };
        // States 2, 3 and 4 share the lowest energy; 2 and 4 have the top count
        let energy = |s: u64| if s == 1 { 0.0 } else { -1.0 };
        assert_eq!(counts.best_by(energy), Some((2, 5)));
        assert!((counts.mean(energy) + 0.8).abs() < 1e-12);
    }
}
