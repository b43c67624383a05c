//! Trait definitions for similarity strategies.

use super::{compare_with_entries, not_comparable, Comparison, ComparisonDetails, StrategyKind};
use crate::core::aggregate::{nearest_neighbor_entries, FilterConfig};
use crate::core::assignment::{build_matching, Refiner, RefinerConfig};
use crate::core::descriptor::{order_by_size, validate_descriptors};
use crate::error::{Result, SetRole};
use rand::RngCore;
use tracing::debug;

/// Strategy trait for scoring two descriptor sets
///
/// Lower scores mean more similar sets; no strategy normalizes to [0, 1].
pub trait SimilarityStrategy: Send + Sync {
    /// Score two descriptor sets
    fn compare(&self, set_a: &[&[f32]], set_b: &[&[f32]], descriptor_size: usize) -> Result<Comparison>;

    /// Score two descriptor sets drawing randomness from `rng`.
    ///
    /// Strategies that consume no randomness ignore the generator.
    fn compare_with_rng(
        &self,
        set_a: &[&[f32]],
        set_b: &[&[f32]],
        descriptor_size: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<Comparison> {
        self.compare(set_a, set_b, descriptor_size)
    }

    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Greedy assignment followed by swap refinement
#[derive(Debug, Clone, Default)]
pub struct GreedyRefinementStrategy {
    refiner: Refiner,
}

impl GreedyRefinementStrategy {
    pub fn new(config: RefinerConfig) -> Self {
        Self {
            refiner: Refiner::new(config),
        }
    }
}

impl SimilarityStrategy for GreedyRefinementStrategy {
    fn compare(&self, set_a: &[&[f32]], set_b: &[&[f32]], descriptor_size: usize) -> Result<Comparison> {
        let mut rng = self.refiner.config().rng();
        self.compare_with_rng(set_a, set_b, descriptor_size, &mut rng)
    }

    fn compare_with_rng(
        &self,
        set_a: &[&[f32]],
        set_b: &[&[f32]],
        descriptor_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Comparison> {
        let (smaller, larger, roles_swapped) = order_by_size(set_a, set_b);
        debug!(
            smaller = smaller.len(),
            larger = larger.len(),
            roles_swapped,
            "Comparing with greedy assignment"
        );

        let initial = build_matching(smaller, larger, descriptor_size)?;
        let refined = self
            .refiner
            .refine_with_rng(smaller, larger, descriptor_size, &initial.matching, rng)?;

        Ok(Comparison {
            score: refined.total_cost,
            strategy: StrategyKind::GreedyWithRefinement,
            details: ComparisonDetails::Assignment {
                roles_swapped,
                matching: refined.matching,
                initial_cost: refined.initial_cost,
                trials: refined.trials,
                accepted_swaps: refined.accepted_swaps,
            },
        })
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::GreedyWithRefinement
    }

    fn description(&self) -> String {
        format!(
            "Greedy assignment refined by {} random swap trials: score is the total squared distance",
            self.refiner.config().iterations
        )
    }
}

/// Nearest-neighbour entries filtered by a dynamic threshold, then averaged
#[derive(Debug, Clone, Default)]
pub struct ThresholdAggregateStrategy {
    filter: FilterConfig,
}

impl ThresholdAggregateStrategy {
    pub fn new(filter: FilterConfig) -> Self {
        Self { filter }
    }
}

impl SimilarityStrategy for ThresholdAggregateStrategy {
    fn compare(&self, set_a: &[&[f32]], set_b: &[&[f32]], descriptor_size: usize) -> Result<Comparison> {
        validate_descriptors(set_a, descriptor_size, SetRole::First)?;
        validate_descriptors(set_b, descriptor_size, SetRole::Second)?;
        if set_a.is_empty() || set_b.is_empty() {
            return Ok(not_comparable(StrategyKind::ThresholdFilteredAggregate));
        }

        let entries = nearest_neighbor_entries(set_a, set_b, descriptor_size)?;
        compare_with_entries(set_a, set_b, descriptor_size, &entries, &self.filter)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::ThresholdFilteredAggregate
    }

    fn description(&self) -> String {
        format!(
            "Threshold aggregate: mean squared distance of nearest neighbours within {}x the best match",
            self.filter.threshold_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::as_rows;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn greedy_swaps_roles_for_smaller_second_set() {
        let a = vec![vec![0.0f32], vec![5.0], vec![9.0]];
        let b = vec![vec![5.0f32]];
        let strategy = GreedyRefinementStrategy::new(RefinerConfig::new().iterations(10).seed(1));

        let comparison = strategy.compare(&as_rows(&a), &as_rows(&b), 1).unwrap();

        assert_eq!(comparison.score, 0.0);
        match comparison.details {
            ComparisonDetails::Assignment {
                roles_swapped,
                matching,
                ..
            } => {
                assert!(roles_swapped);
                assert_eq!(matching.targets(), &[1]);
            }
            other => panic!("Expected assignment details, got {:?}", other),
        }
    }

    #[test]
    fn greedy_with_injected_rng_is_reproducible() {
        let a = vec![vec![0.0f32], vec![3.0], vec![7.0], vec![1.0]];
        let b = vec![vec![6.5f32], vec![0.5], vec![2.0], vec![8.0], vec![4.0]];
        let (a, b) = (as_rows(&a), as_rows(&b));
        let strategy = GreedyRefinementStrategy::new(RefinerConfig::new().iterations(100));

        let first = strategy
            .compare_with_rng(&a, &b, 1, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let second = strategy
            .compare_with_rng(&a, &b, 1, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_returns_sentinel_for_empty_set() {
        let a = vec![vec![1.0f32, 2.0]];
        let b: Vec<Vec<f32>> = Vec::new();
        let strategy = ThresholdAggregateStrategy::default();

        let comparison = strategy.compare(&as_rows(&a), &as_rows(&b), 2).unwrap();

        assert_eq!(comparison.score, f32::MAX as f64);
        assert!(!comparison.is_comparable());
    }

    #[test]
    fn aggregate_scores_nearest_neighbours() {
        // Nearest distances: 1, 2, 10 -> keep 1 and 2
        let a = vec![vec![0.0f32], vec![10.0], vec![40.0]];
        let b = vec![vec![1.0f32], vec![12.0], vec![30.0]];
        let strategy = ThresholdAggregateStrategy::default();

        let comparison = strategy.compare(&as_rows(&a), &as_rows(&b), 1).unwrap();

        assert_eq!(comparison.score, 2.5);
    }

    #[test]
    fn descriptions_mention_parameters() {
        let greedy = GreedyRefinementStrategy::new(RefinerConfig::new().iterations(123));
        assert!(greedy.description().contains("123"));
        assert_eq!(greedy.kind(), StrategyKind::GreedyWithRefinement);

        let aggregate = ThresholdAggregateStrategy::new(FilterConfig::new().threshold_factor(3.0));
        assert!(aggregate.description().contains('3'));
        assert_eq!(aggregate.kind(), StrategyKind::ThresholdFilteredAggregate);
    }
}
