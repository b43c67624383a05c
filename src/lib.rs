//! # Descriptor Similarity
//!
//! Estimates how visually similar two images are by comparing their sets of
//! local feature descriptors.
//!
//! ## Core Philosophy
//! - **Never guess** - malformed input is an error, not a silent zero score
//! - **Keep the heuristics honest** - greedy assignment plus randomized
//!   refinement, no claim of a globally optimal matching
//! - **Reproducible** - all randomness comes from an injected, seedable generator
//!
//! ## Architecture
//! - `core` - Matching and scoring engine (descriptor sets, assignment, aggregate scoring)
//! - `events` - Event-driven progress reporting for batch comparisons
//! - `error` - Typed error kinds
//!
//! Keypoint detection and descriptor extraction live outside this crate; callers
//! hand over descriptor vectors and their shared length.

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::comparator::{compare_descriptor_sets, Comparison, StrategyKind};
pub use error::{ErrorKind, Result, SimilarityError};

/// Initialize tracing for the library
///
/// This should be called by the host application, never by library code.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("A global tracing subscriber was already installed");
    }
}
