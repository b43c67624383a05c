//! Brute-force nearest-neighbour search producing [`DistanceEntry`] lists.

use super::DistanceEntry;
use crate::core::descriptor::{squared_euclidean, validate_descriptors};
use crate::error::{InputError, SetRole};

/// For every query descriptor, find the closest train descriptor.
///
/// Returns one entry per query descriptor with the Euclidean (not squared)
/// distance; ties go to the lower train index. Several queries may share a
/// train descriptor. An empty query or train set yields no entries.
pub fn nearest_neighbor_entries<A, B>(
    query: &[A],
    train: &[B],
    descriptor_size: usize,
) -> Result<Vec<DistanceEntry>, InputError>
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
{
    validate_descriptors(query, descriptor_size, SetRole::First)?;
    validate_descriptors(train, descriptor_size, SetRole::Second)?;

    let mut entries = Vec::with_capacity(query.len());
    if train.is_empty() {
        return Ok(entries);
    }

    for (source_index, q) in query.iter().enumerate() {
        let q = q.as_ref();
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (index, t) in train.iter().enumerate() {
            let distance = squared_euclidean(q, t.as_ref());
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        entries.push(DistanceEntry::new(source_index, best_index, best_distance.sqrt()));
    }

    Ok(entries)
}
