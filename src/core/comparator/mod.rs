//! # Comparator Module
//!
//! Scores how similar two descriptor sets are.
//!
//! ## Strategies
//! | Strategy | Correspondence | Score |
//! |----------|----------------|-------|
//! | `GreedyWithRefinement` | one-to-one, greedy then swap-refined | total squared distance |
//! | `ThresholdFilteredAggregate` | nearest neighbour, many-to-one | mean squared distance of good matches |
//!
//! Both scores are distances: 0 means identical, larger means less similar,
//! and neither is bounded above. Hosts that need a [0, 1] similarity apply
//! their own normalization.

mod config;
mod traits;

pub use config::ComparatorConfig;
pub use traits::{GreedyRefinementStrategy, SimilarityStrategy, ThresholdAggregateStrategy};

use crate::core::aggregate::{score_with_config, DistanceEntry, FilterConfig};
use crate::core::assignment::Matching;
use crate::core::descriptor::validate_descriptors;
use crate::error::{InputError, Result, SetRole};
use serde::{Deserialize, Serialize};

/// Score reported when a set is empty and the sets can't be compared
pub const NOT_COMPARABLE: f64 = f32::MAX as f64;

/// Available comparison strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Greedy one-to-one assignment refined by random swaps
    GreedyWithRefinement,
    /// Mean squared distance of nearest neighbours passing a dynamic threshold
    ThresholdFilteredAggregate,
}

impl StrategyKind {
    /// Get a human-readable description of the strategy
    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::GreedyWithRefinement => {
                "Greedy assignment + swap refinement - one-to-one, sum of squared distances"
            }
            StrategyKind::ThresholdFilteredAggregate => {
                "Threshold-filtered aggregate - nearest neighbours, mean squared distance of good matches"
            }
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::GreedyWithRefinement => write!(f, "greedy+refine"),
            StrategyKind::ThresholdFilteredAggregate => write!(f, "threshold-aggregate"),
        }
    }
}

/// Result of comparing two descriptor sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Distance score, lower = more similar
    pub score: f64,
    /// Strategy that produced the score
    pub strategy: StrategyKind,
    /// Strategy-specific diagnostics
    pub details: ComparisonDetails,
}

impl Comparison {
    /// False when one of the sets was empty and `score` is the sentinel
    pub fn is_comparable(&self) -> bool {
        !matches!(self.details, ComparisonDetails::NotComparable)
    }

    /// The one-to-one matching, for assignment-based strategies
    pub fn matching(&self) -> Option<&Matching> {
        match &self.details {
            ComparisonDetails::Assignment { matching, .. } => Some(matching),
            _ => None,
        }
    }
}

/// Diagnostics attached to a [`Comparison`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComparisonDetails {
    Assignment {
        /// True when the second set was treated as the smaller one;
        /// the matching then maps second-set indices to first-set indices
        roles_swapped: bool,
        matching: Matching,
        /// Cost of the greedy matching before refinement
        initial_cost: f64,
        trials: usize,
        accepted_swaps: usize,
    },
    Aggregate {
        min_distance: f64,
        threshold: f64,
        good_matches: usize,
        total_entries: usize,
    },
    /// One of the sets was empty
    NotComparable,
}

/// Borrow each descriptor of a set as a slice
pub fn as_rows<R: AsRef<[f32]>>(set: &[R]) -> Vec<&[f32]> {
    set.iter().map(|d| d.as_ref()).collect()
}

/// Compare two descriptor sets with a strategy's default configuration.
///
/// The greedy strategy runs 10000 unseeded swap trials; the aggregate
/// strategy computes nearest-neighbour entries by brute force. Use
/// [`ComparatorConfig`] for seeds and tuning, or [`compare_with_entries`]
/// for precomputed nearest neighbours.
pub fn compare_descriptor_sets<A, B>(
    set_a: &[A],
    set_b: &[B],
    descriptor_size: usize,
    strategy: StrategyKind,
) -> Result<f64>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
{
    let comparison = ComparatorConfig::new()
        .strategy(strategy)
        .build()?
        .compare(&as_rows(set_a), &as_rows(set_b), descriptor_size)?;
    Ok(comparison.score)
}

/// Score caller-supplied nearest-neighbour entries between two sets.
///
/// Entries must index into `set_a` (source) and `set_b` (target). If either
/// set is empty the sentinel [`NOT_COMPARABLE`] is returned instead of a score.
pub fn compare_with_entries<A, B>(
    set_a: &[A],
    set_b: &[B],
    descriptor_size: usize,
    entries: &[DistanceEntry],
    filter: &FilterConfig,
) -> Result<Comparison>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
{
    validate_descriptors(set_a, descriptor_size, SetRole::First)?;
    validate_descriptors(set_b, descriptor_size, SetRole::Second)?;
    if set_a.is_empty() || set_b.is_empty() {
        return Ok(not_comparable(StrategyKind::ThresholdFilteredAggregate));
    }

    if let Some((index, entry)) = entries
        .iter()
        .enumerate()
        .find(|(_, e)| e.source_index >= set_a.len() || e.target_index >= set_b.len())
    {
        return Err(InputError::EntryOutOfRange {
            index,
            source_index: entry.source_index,
            target_index: entry.target_index,
            first_len: set_a.len(),
            second_len: set_b.len(),
        }
        .into());
    }

    let scored = score_with_config(entries, filter)?;
    Ok(Comparison {
        score: scored.score,
        strategy: StrategyKind::ThresholdFilteredAggregate,
        details: ComparisonDetails::Aggregate {
            min_distance: scored.min_distance,
            threshold: scored.threshold,
            good_matches: scored.good_matches,
            total_entries: scored.total_entries,
        },
    })
}

pub(crate) fn not_comparable(strategy: StrategyKind) -> Comparison {
    Comparison {
        score: NOT_COMPARABLE,
        strategy,
        details: ComparisonDetails::NotComparable,
    }
}
