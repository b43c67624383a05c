//! The injective correspondence shared by the builder and the refiner.

use crate::core::descriptor::total_squared_distance;
use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Maps each index of the smaller set to a distinct index of the larger set.
///
/// `targets[i]` is the larger-set index paired with smaller-set index `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    targets: Vec<usize>,
}

impl Matching {
    /// Wrap a target list without checking it.
    ///
    /// Use [`Matching::validate`] before trusting a matching from outside the engine.
    pub fn new(targets: Vec<usize>) -> Self {
        Self { targets }
    }

    /// Number of matched pairs (the smaller set's cardinality)
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Larger-set index paired with smaller-set index `source`
    pub fn target(&self, source: usize) -> Option<usize> {
        self.targets.get(source).copied()
    }

    /// Get the raw target list
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Iterate over `(smaller_index, larger_index)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    /// Exchange the targets of two smaller-set indices
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.targets.swap(i, j);
    }

    /// Check that the matching covers `smaller_len` indices, stays inside
    /// `larger_len` and never reuses a target.
    pub fn validate(&self, smaller_len: usize, larger_len: usize) -> Result<(), InputError> {
        if self.targets.len() != smaller_len {
            return Err(InputError::MatchingLength {
                expected: smaller_len,
                actual: self.targets.len(),
            });
        }

        // Vec<Option<usize>> instead of a HashSet: targets are dense indices
        let mut owner: Vec<Option<usize>> = vec![None; larger_len];
        for (source, target) in self.pairs() {
            let slot = owner.get_mut(target).ok_or(InputError::TargetOutOfRange {
                source_index: source,
                target,
                larger_len,
            })?;
            if let Some(first) = *slot {
                return Err(InputError::DuplicateTarget {
                    first,
                    second: source,
                    target,
                });
            }
            *slot = Some(source);
        }
        Ok(())
    }

    /// Sum of squared distances over all matched pairs
    pub fn cost<A, B>(&self, smaller: &[A], larger: &[B]) -> f64
    where
        A: AsRef<[f32]>,
        B: AsRef<[f32]>,
    {
        total_squared_distance(smaller, larger, self.pairs())
    }

    /// Larger-set indices left without a partner
    pub fn unmatched_targets(&self, larger_len: usize) -> Vec<usize> {
        let mut used = vec![false; larger_len];
        for &t in &self.targets {
            if let Some(flag) = used.get_mut(t) {
                *flag = true;
            }
        }
        (0..larger_len).filter(|&t| !used[t]).collect()
    }
}

impl From<Vec<usize>> for Matching {
    fn from(targets: Vec<usize>) -> Self {
        Self::new(targets)
    }
}
