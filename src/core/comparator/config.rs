//! Builder for similarity strategies.

use super::{GreedyRefinementStrategy, SimilarityStrategy, StrategyKind, ThresholdAggregateStrategy};
use crate::core::aggregate::FilterConfig;
use crate::core::assignment::RefinerConfig;
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Configuration builder for comparison strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorConfig {
    strategy: StrategyKind,
    refiner: RefinerConfig,
    filter: FilterConfig,
}

impl ComparatorConfig {
    /// Create a configuration with defaults (greedy + refinement, 10000 trials)
    pub fn new() -> Self {
        Self {
            strategy: StrategyKind::GreedyWithRefinement,
            refiner: RefinerConfig::default(),
            filter: FilterConfig::default(),
        }
    }

    /// Set the comparison strategy
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Number of swap trials for the refiner
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.refiner.iterations = iterations;
        self
    }

    /// Seed for the refiner's random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.refiner.seed = Some(seed);
        self
    }

    /// Stop refinement after this many consecutive non-improving trials
    pub fn patience(mut self, trials: usize) -> Self {
        self.refiner.patience = Some(trials);
        self
    }

    /// Multiple of the minimum distance kept by the aggregate filter
    pub fn threshold_factor(mut self, factor: f64) -> Self {
        self.filter.threshold_factor = factor;
        self
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy
    }

    pub fn refiner_config(&self) -> &RefinerConfig {
        &self.refiner
    }

    /// Build the strategy
    pub fn build(self) -> Result<Box<dyn SimilarityStrategy>, InputError> {
        match self.strategy {
            StrategyKind::GreedyWithRefinement => {
                Ok(Box::new(GreedyRefinementStrategy::new(self.refiner)))
            }
            StrategyKind::ThresholdFilteredAggregate => {
                self.filter.validate()?;
                Ok(Box::new(ThresholdAggregateStrategy::new(self.filter)))
            }
        }
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
