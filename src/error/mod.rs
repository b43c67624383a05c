//! # Error Module
//!
//! Error types for descriptor matching and scoring.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - which set, which index, expected vs. actual
//! - **No recovery values** - a malformed comparison never becomes a score

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of a comparison an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetRole {
    /// The set iterated by the assignment builder
    Smaller,
    /// The set whose elements are consumed by the assignment builder
    Larger,
    /// First set handed to the comparison facade
    First,
    /// Second set handed to the comparison facade
    Second,
}

impl std::fmt::Display for SetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetRole::Smaller => write!(f, "smaller set"),
            SetRole::Larger => write!(f, "larger set"),
            SetRole::First => write!(f, "first set"),
            SetRole::Second => write!(f, "second set"),
        }
    }
}

/// Top-level error for every matching and scoring operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("No distance entries to score")]
    EmptyInput,

    #[error("No good matches within threshold {threshold} (minimum distance {min_distance})")]
    NoGoodMatches { min_distance: f64, threshold: f64 },
}

/// Category of a [`SimilarityError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    EmptyInput,
    NoGoodMatches,
}

impl SimilarityError {
    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimilarityError::InvalidInput(_) => ErrorKind::InvalidInput,
            SimilarityError::EmptyInput => ErrorKind::EmptyInput,
            SimilarityError::NoGoodMatches { .. } => ErrorKind::NoGoodMatches,
        }
    }
}

/// Details of malformed or inconsistent input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Descriptor size must be positive")]
    ZeroDescriptorSize,

    #[error("The {role} is empty")]
    EmptySet { role: SetRole },

    #[error("Descriptor {index} in the {role} has {actual} elements, expected {expected}")]
    DescriptorLength {
        role: SetRole,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Flat descriptor buffer of {len} values is not a multiple of descriptor size {descriptor_size}")]
    RaggedBuffer { len: usize, descriptor_size: usize },

    #[error("The smaller set has {smaller} descriptors but the larger set only {larger}")]
    SetOrder { smaller: usize, larger: usize },

    #[error("Matching covers {actual} indices, expected {expected}")]
    MatchingLength { expected: usize, actual: usize },

    #[error("Matching maps index {source_index} to {target}, outside a set of {larger_len}")]
    TargetOutOfRange {
        source_index: usize,
        target: usize,
        larger_len: usize,
    },

    #[error("Matching is not injective: indices {first} and {second} both map to {target}")]
    DuplicateTarget {
        first: usize,
        second: usize,
        target: usize,
    },

    #[error("Distance entry {index} has invalid distance {distance}")]
    InvalidDistance { index: usize, distance: f64 },

    #[error("Distance entry {index} pairs {source_index} with {target_index}, outside sets of {first_len} and {second_len}")]
    EntryOutOfRange {
        index: usize,
        source_index: usize,
        target_index: usize,
        first_len: usize,
        second_len: usize,
    },

    #[error("Threshold factor must be finite and positive, got {value}")]
    InvalidThresholdFactor { value: f64 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SimilarityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_length_error_includes_context() {
        let error = InputError::DescriptorLength {
            role: SetRole::Larger,
            index: 7,
            expected: 64,
            actual: 63,
        };
        let message = error.to_string();
        assert!(message.contains("larger set"));
        assert!(message.contains('7'));
        assert!(message.contains("64"));
        assert!(message.contains("63"));
    }

    #[test]
    fn input_error_converts_to_invalid_input() {
        let error: SimilarityError = InputError::ZeroDescriptorSize.into();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(error.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(SimilarityError::EmptyInput.kind(), ErrorKind::EmptyInput);
        let error = SimilarityError::NoGoodMatches {
            min_distance: 1.0,
            threshold: 0.5,
        };
        assert_eq!(error.kind(), ErrorKind::NoGoodMatches);
        assert!(error.to_string().contains("0.5"));
    }
}
