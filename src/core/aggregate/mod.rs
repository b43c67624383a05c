//! # Aggregate Module
//!
//! Scores a nearest-neighbour correspondence without building a one-to-one
//! assignment.
//!
//! ## How It Works
//! 1. Find the smallest distance among all entries
//! 2. Keep the "good" entries: distance <= `threshold_factor` x minimum (2 by default)
//! 3. Return the mean squared distance of the good entries
//!
//! Entries may be many-to-one; several sources can share a target.

mod nearest;

pub use nearest::nearest_neighbor_entries;

use crate::error::{InputError, Result, SimilarityError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default multiple of the minimum distance a good match may reach
pub const DEFAULT_THRESHOLD_FACTOR: f64 = 2.0;

/// One nearest-neighbour correspondence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEntry {
    /// Index in the query set
    pub source_index: usize,
    /// Index in the train set
    pub target_index: usize,
    /// Euclidean distance between the two descriptors
    pub distance: f64,
}

impl DistanceEntry {
    pub fn new(source_index: usize, target_index: usize, distance: f64) -> Self {
        Self {
            source_index,
            target_index,
            distance,
        }
    }
}

/// Configuration for the good-match filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Entries with distance <= factor x minimum distance are kept
    pub threshold_factor: f64,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self {
            threshold_factor: DEFAULT_THRESHOLD_FACTOR,
        }
    }

    /// Set the multiple of the minimum distance used as threshold
    pub fn threshold_factor(mut self, factor: f64) -> Self {
        self.threshold_factor = factor;
        self
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), InputError> {
        if self.threshold_factor.is_finite() && self.threshold_factor > 0.0 {
            Ok(())
        } else {
            Err(InputError::InvalidThresholdFactor {
                value: self.threshold_factor,
            })
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed outcome of the filtered scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredScore {
    /// Mean squared distance over the good matches
    pub score: f64,
    /// Smallest distance among all entries
    pub min_distance: f64,
    /// Distance cut-off applied
    pub threshold: f64,
    /// Number of entries kept
    pub good_matches: usize,
    /// Number of entries examined
    pub total_entries: usize,
}

/// Mean squared distance over good matches, with the default factor of 2.
///
/// # Errors
/// - `EmptyInput` when `entries` is empty
/// - `InvalidInput` when a distance is negative or NaN
/// - `NoGoodMatches` when the filter keeps nothing
pub fn score_filtered_matches(entries: &[DistanceEntry]) -> Result<f64> {
    score_with_config(entries, &FilterConfig::default()).map(|s| s.score)
}

/// Filtered score with an explicit configuration and full details
pub fn score_with_config(entries: &[DistanceEntry], config: &FilterConfig) -> Result<FilteredScore> {
    config.validate()?;
    if entries.is_empty() {
        return Err(SimilarityError::EmptyInput);
    }
    if let Some((index, entry)) = entries
        .iter()
        .enumerate()
        .find(|(_, e)| e.distance.is_nan() || e.distance < 0.0)
    {
        return Err(InputError::InvalidDistance {
            index,
            distance: entry.distance,
        }
        .into());
    }

    let min_distance = entries
        .iter()
        .map(|e| e.distance)
        .fold(f64::INFINITY, f64::min);
    let threshold = config.threshold_factor * min_distance;

    let (good_matches, sum_squared) = entries
        .iter()
        .filter(|e| e.distance <= threshold)
        .fold((0usize, 0.0f64), |(n, sum), e| (n + 1, sum + e.distance * e.distance));

    if good_matches == 0 {
        return Err(SimilarityError::NoGoodMatches {
            min_distance,
            threshold,
        });
    }

    let score = sum_squared / good_matches as f64;
    debug!(
        min_distance,
        threshold,
        good_matches,
        total = entries.len(),
        score,
        "Scored filtered matches"
    );

    Ok(FilteredScore {
        score,
        min_distance,
        threshold,
        good_matches,
        total_entries: entries.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entries(distances: &[f64]) -> Vec<DistanceEntry> {
        distances
            .iter()
            .enumerate()
            .map(|(i, &d)| DistanceEntry::new(i, 0, d))
            .collect()
    }

    #[test]
    fn keeps_entries_within_twice_the_minimum() {
        let score = score_filtered_matches(&entries(&[1.0, 2.0, 3.0, 100.0])).unwrap();
        // (1 + 4) / 2
        assert_eq!(score, 2.5);
    }

    #[test]
    fn single_entry_is_its_own_square() {
        assert_eq!(score_filtered_matches(&entries(&[5.0])).unwrap(), 25.0);
    }

    #[test]
    fn order_does_not_matter() {
        let score = score_filtered_matches(&entries(&[100.0, 3.0, 2.0, 1.0])).unwrap();
        assert_eq!(score, 2.5);
    }

    #[test]
    fn zero_minimum_keeps_only_zeros() {
        let details = score_with_config(&entries(&[0.0, 0.0, 0.5]), &FilterConfig::default()).unwrap();
        assert_eq!(details.score, 0.0);
        assert_eq!(details.good_matches, 2);
        assert_eq!(details.threshold, 0.0);
    }

    #[test]
    fn reports_details() {
        let details = score_with_config(&entries(&[1.0, 2.0, 3.0, 100.0]), &FilterConfig::default()).unwrap();
        assert_eq!(details.min_distance, 1.0);
        assert_eq!(details.threshold, 2.0);
        assert_eq!(details.good_matches, 2);
        assert_eq!(details.total_entries, 4);
    }

    #[test]
    fn empty_input_fails() {
        let err = score_filtered_matches(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn negative_or_nan_distance_is_invalid() {
        let err = score_filtered_matches(&entries(&[1.0, -0.5])).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::InvalidInput(InputError::InvalidDistance {
                index: 1,
                distance: -0.5
            })
        );

        let err = score_filtered_matches(&entries(&[f64::NAN])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn factor_below_one_can_reject_everything() {
        let config = FilterConfig::new().threshold_factor(0.5);
        let err = score_with_config(&entries(&[2.0, 3.0]), &config).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::NoGoodMatches {
                min_distance: 2.0,
                threshold: 1.0
            }
        );
    }

    #[test]
    fn wider_factor_keeps_more() {
        let config = FilterConfig::new().threshold_factor(3.0);
        let details = score_with_config(&entries(&[1.0, 2.0, 3.0, 100.0]), &config).unwrap();
        assert_eq!(details.good_matches, 3);
        // (1 + 4 + 9) / 3
        assert!((details.score - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_factor_is_rejected() {
        let config = FilterConfig::new().threshold_factor(f64::NAN);
        let err = score_with_config(&entries(&[1.0]), &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let config = FilterConfig::new().threshold_factor(0.0);
        assert!(score_with_config(&entries(&[1.0]), &config).is_err());
    }
}
