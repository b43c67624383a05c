//! Randomized pairwise-swap local search over an existing matching.
//!
//! Each trial picks two smaller-set indices at random and exchanges their
//! targets if that does not increase the cost of the two pairs. Swapping
//! only permutes targets, so the set of used larger-set indices and the
//! injectivity of the matching never change.

use super::Matching;
use crate::core::descriptor::{squared_euclidean, validate_non_empty};
use crate::error::{Result, SetRole};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default number of swap trials
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Outcome of a refinement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementResult {
    /// The refined matching
    pub matching: Matching,
    /// Sum of squared distances of the refined matching
    pub total_cost: f64,
    /// Sum of squared distances of the matching handed in
    pub initial_cost: f64,
    /// Swap trials actually run
    pub trials: usize,
    /// Trials whose swap was kept
    pub accepted_swaps: usize,
}

/// Configuration for the refiner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinerConfig {
    /// Number of swap trials
    pub iterations: usize,
    /// Seed for the random source; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Stop after this many consecutive trials without a strict improvement.
    /// `None` always runs every trial.
    pub patience: Option<usize>,
}

impl RefinerConfig {
    /// Create a configuration with defaults (10000 trials, unseeded, no early stop)
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            patience: None,
        }
    }

    /// Set the number of swap trials
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Seed the random source for reproducible runs
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable early stopping after `trials` consecutive non-improving trials
    pub fn patience(mut self, trials: usize) -> Self {
        self.patience = Some(trials);
        self
    }

    /// Create the random source described by this configuration
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Swap-based local search driven by a [`RefinerConfig`]
#[derive(Debug, Clone, Default)]
pub struct Refiner {
    config: RefinerConfig,
}

impl Refiner {
    pub fn new(config: RefinerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    /// Refine with a generator created from the configured seed
    pub fn refine<A, B>(
        &self,
        smaller: &[A],
        larger: &[B],
        descriptor_size: usize,
        matching: &Matching,
    ) -> Result<RefinementResult>
    where
        A: AsRef<[f32]>,
        B: AsRef<[f32]>,
    {
        let mut rng = self.config.rng();
        self.refine_with_rng(smaller, larger, descriptor_size, matching, &mut rng)
    }

    /// Refine with a caller-supplied generator
    pub fn refine_with_rng<A, B, R>(
        &self,
        smaller: &[A],
        larger: &[B],
        descriptor_size: usize,
        matching: &Matching,
        rng: &mut R,
    ) -> Result<RefinementResult>
    where
        A: AsRef<[f32]>,
        B: AsRef<[f32]>,
        R: Rng + ?Sized,
    {
        run(
            smaller,
            larger,
            descriptor_size,
            matching,
            self.config.iterations,
            self.config.patience,
            rng,
        )
    }
}

/// Run exactly `iterations` swap trials over `matching`.
///
/// # Errors
/// `InvalidInput` when the descriptor sets are malformed (see
/// [`build_matching`](super::build_matching)) or `matching` is not an
/// injective map from `smaller` into `larger`.
pub fn refine_matching<A, B, R>(
    smaller: &[A],
    larger: &[B],
    descriptor_size: usize,
    matching: &Matching,
    iterations: usize,
    rng: &mut R,
) -> Result<RefinementResult>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
    R: Rng + ?Sized,
{
    run(smaller, larger, descriptor_size, matching, iterations, None, rng)
}

fn run<A, B, R>(
    smaller: &[A],
    larger: &[B],
    descriptor_size: usize,
    matching: &Matching,
    iterations: usize,
    patience: Option<usize>,
    rng: &mut R,
) -> Result<RefinementResult>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
    R: Rng + ?Sized,
{
    validate_non_empty(smaller, descriptor_size, SetRole::Smaller)?;
    validate_non_empty(larger, descriptor_size, SetRole::Larger)?;
    matching.validate(smaller.len(), larger.len())?;

    let pair_cost = |source: usize, target: usize| {
        squared_euclidean(smaller[source].as_ref(), larger[target].as_ref())
    };

    let mut matching = matching.clone();
    let initial_cost = matching.cost(smaller, larger);
    let mut accepted_swaps = 0;
    let mut since_improvement = 0;
    let mut trials = 0;
    let n = matching.len();

    while trials < iterations {
        if patience.is_some_and(|p| since_improvement >= p) {
            trace!(trials, "Refinement stopped early");
            break;
        }
        trials += 1;

        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        let (ti, tj) = (matching.targets()[i], matching.targets()[j]);

        let old_cost = pair_cost(i, ti) + pair_cost(j, tj);
        let new_cost = pair_cost(i, tj) + pair_cost(j, ti);

        // Ties are accepted so the search keeps moving across plateaus
        if new_cost <= old_cost {
            matching.swap(i, j);
            accepted_swaps += 1;
        }
        if new_cost < old_cost {
            since_improvement = 0;
        } else {
            since_improvement += 1;
        }
    }

    // Summing swap deltas drifts, so the reported cost is taken from the final matching
    let total_cost = matching.cost(smaller, larger);
    debug!(
        initial_cost,
        total_cost,
        trials,
        accepted_swaps,
        "Refined matching"
    );

    Ok(RefinementResult {
        matching,
        total_cost,
        initial_cost,
        trials,
        accepted_swaps,
    })
}
