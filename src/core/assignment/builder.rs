//! Greedy nearest-neighbour assignment without replacement.
//!
//! Walks the smaller set in storage order and gives each descriptor the
//! closest larger-set descriptor nobody has claimed yet. Earlier decisions
//! are never revisited, so the result depends on the order of the smaller
//! set and is not globally optimal.

use super::{AssignmentResult, Matching};
use crate::core::descriptor::{squared_euclidean, validate_non_empty};
use crate::error::{InputError, Result, SetRole};
use tracing::debug;

/// Build an initial matching from `smaller` into `larger`.
///
/// Ties go to the first larger-set index reaching the minimum distance.
///
/// # Errors
/// `InvalidInput` when `descriptor_size` is zero, either set is empty, a
/// descriptor has the wrong length, or `smaller` has more elements than `larger`.
pub fn build_matching<A, B>(smaller: &[A], larger: &[B], descriptor_size: usize) -> Result<AssignmentResult>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
{
    validate_non_empty(smaller, descriptor_size, SetRole::Smaller)?;
    validate_non_empty(larger, descriptor_size, SetRole::Larger)?;
    if smaller.len() > larger.len() {
        return Err(InputError::SetOrder {
            smaller: smaller.len(),
            larger: larger.len(),
        }
        .into());
    }

    let mut consumed = vec![false; larger.len()];
    let mut targets = Vec::with_capacity(smaller.len());
    let mut total_cost = 0.0;

    for descriptor in smaller {
        let descriptor = descriptor.as_ref();
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in larger.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            let distance = squared_euclidean(descriptor, candidate.as_ref());
            // Strict comparison keeps the first index on ties
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        // Only reachable if the size check above is bypassed
        let (index, distance) = best.ok_or(InputError::SetOrder {
            smaller: smaller.len(),
            larger: larger.len(),
        })?;
        consumed[index] = true;
        targets.push(index);
        total_cost += distance;
    }

    debug!(
        smaller = smaller.len(),
        larger = larger.len(),
        total_cost,
        "Built greedy matching"
    );

    Ok(AssignmentResult {
        matching: Matching::new(targets),
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn set(rows: &[&[f32]]) -> Vec<Vec<f32>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn picks_nearest_unconsumed_target() {
        let smaller = set(&[&[0.0], &[10.0]]);
        let larger = set(&[&[9.0], &[1.0], &[100.0]]);

        let result = build_matching(&smaller, &larger, 1).unwrap();

        assert_eq!(result.matching.targets(), &[1, 0]);
        // 1^2 + 1^2
        assert_eq!(result.total_cost, 2.0);
    }

    #[test]
    fn greedy_never_revisits_earlier_choice() {
        // The first element grabs 3.5 and leaves the second one stranded at 8
        let smaller = set(&[&[4.0], &[0.0]]);
        let larger = set(&[&[3.5], &[8.0]]);

        let result = build_matching(&smaller, &larger, 1).unwrap();

        assert_eq!(result.matching.targets(), &[0, 1]);
        // 0.25 + 64, while the swapped pairing costs 16 + 12.25
        assert_eq!(result.total_cost, 64.25);
        assert!(Matching::new(vec![1, 0]).cost(&smaller, &larger) < result.total_cost);
    }

    #[test]
    fn first_index_wins_ties() {
        let smaller = set(&[&[0.0]]);
        let larger = set(&[&[1.0], &[-1.0], &[1.0]]);

        let result = build_matching(&smaller, &larger, 1).unwrap();

        assert_eq!(result.matching.targets(), &[0]);
    }

    #[test]
    fn output_is_injective() {
        // Every smaller element is closest to the same target
        let smaller = set(&[&[0.0, 0.0], &[0.1, 0.0], &[0.0, 0.1]]);
        let larger = set(&[&[0.0, 0.0], &[5.0, 5.0], &[9.0, 9.0], &[7.0, 1.0]]);

        let result = build_matching(&smaller, &larger, 2).unwrap();

        assert!(result.matching.validate(3, 4).is_ok());
    }

    #[test]
    fn identical_sets_cost_nothing() {
        let a = set(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let b = set(&[&[5.0, 6.0], &[1.0, 2.0], &[3.0, 4.0]]);

        let result = build_matching(&a, &b, 2).unwrap();

        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.matching.targets(), &[1, 2, 0]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let smaller = set(&[&[1.0, 2.0]]);
        let larger = set(&[&[1.0, 2.0], &[1.0]]);

        let err = build_matching(&smaller, &larger, 2).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn rejects_empty_sets_and_zero_size() {
        let empty: Vec<Vec<f32>> = Vec::new();
        let one = set(&[&[1.0]]);

        assert_eq!(
            build_matching(&empty, &one, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            build_matching(&one, &empty, 1).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            build_matching(&one, &one, 0).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn rejects_swapped_roles() {
        let two = set(&[&[1.0], &[2.0]]);
        let one = set(&[&[1.0]]);

        let err = build_matching(&two, &one, 1).unwrap_err();

        assert!(err.to_string().contains("smaller set has 2"));
    }
}
