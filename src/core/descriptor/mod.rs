//! # Descriptor Module
//!
//! Descriptor storage, input validation and distance utilities.
//!
//! Every contract in the engine accepts descriptor sets as slices of
//! anything that borrows as `[f32]` (`Vec<f32>`, `&[f32]`, arrays), so
//! callers can keep whatever layout their feature extractor produced.
//! [`DescriptorSet`] covers the common case of one flat buffer with a
//! fixed stride.

pub mod distance;

pub use distance::{euclidean, squared_euclidean, total_squared_distance};

use crate::error::{InputError, SetRole};
use serde::{Deserialize, Serialize};

/// Descriptors of one image, stored as a flat buffer with a fixed stride
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSet {
    values: Vec<f32>,
    descriptor_size: usize,
}

impl DescriptorSet {
    /// Create from a flat buffer holding `values.len() / descriptor_size` descriptors
    pub fn from_flat(values: Vec<f32>, descriptor_size: usize) -> Result<Self, InputError> {
        if descriptor_size == 0 {
            return Err(InputError::ZeroDescriptorSize);
        }
        if values.len() % descriptor_size != 0 {
            return Err(InputError::RaggedBuffer {
                len: values.len(),
                descriptor_size,
            });
        }
        Ok(Self {
            values,
            descriptor_size,
        })
    }

    /// Create from one vector per descriptor, checking every row length
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R], descriptor_size: usize) -> Result<Self, InputError> {
        validate_descriptors(rows, descriptor_size, SetRole::First)?;
        let mut values = Vec::with_capacity(rows.len() * descriptor_size);
        for row in rows {
            values.extend_from_slice(row.as_ref());
        }
        Ok(Self {
            values,
            descriptor_size,
        })
    }

    /// Number of elements in every descriptor
    pub fn descriptor_size(&self) -> usize {
        self.descriptor_size
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.values.len() / self.descriptor_size
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a single descriptor
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.descriptor_size)?;
        let end = start.checked_add(self.descriptor_size)?;
        self.values.get(start..end)
    }

    /// Iterate over descriptors in storage order
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.values.chunks_exact(self.descriptor_size)
    }

    /// Borrow every descriptor as a slice, ready for the matching contracts
    pub fn rows(&self) -> Vec<&[f32]> {
        self.iter().collect()
    }

    /// Get the underlying flat buffer
    pub fn as_flat(&self) -> &[f32] {
        &self.values
    }
}

/// Check the descriptor size and that every descriptor in `set` matches it.
///
/// An empty set is accepted here; contracts that need elements check
/// emptiness themselves.
pub fn validate_descriptors<R: AsRef<[f32]>>(
    set: &[R],
    descriptor_size: usize,
    role: SetRole,
) -> Result<(), InputError> {
    if descriptor_size == 0 {
        return Err(InputError::ZeroDescriptorSize);
    }
    match set
        .iter()
        .position(|d| d.as_ref().len() != descriptor_size)
    {
        Some(index) => Err(InputError::DescriptorLength {
            role,
            index,
            expected: descriptor_size,
            actual: set[index].as_ref().len(),
        }),
        None => Ok(()),
    }
}

/// Like [`validate_descriptors`] but also rejects an empty set
pub fn validate_non_empty<R: AsRef<[f32]>>(
    set: &[R],
    descriptor_size: usize,
    role: SetRole,
) -> Result<(), InputError> {
    validate_descriptors(set, descriptor_size, role)?;
    if set.is_empty() {
        return Err(InputError::EmptySet { role });
    }
    Ok(())
}

/// Order two sets by cardinality.
///
/// Returns `(smaller, larger, swapped)`; `swapped` is true when `b` was
/// designated the smaller set. Equal sizes keep the original order.
pub fn order_by_size<'a, R>(a: &'a [R], b: &'a [R]) -> (&'a [R], &'a [R], bool) {
    if b.len() < a.len() {
        (b, a, true)
    } else {
        (a, b, false)
    }
}
