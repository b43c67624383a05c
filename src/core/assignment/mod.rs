//! # Assignment Module
//!
//! One-to-one correspondence between two descriptor sets.
//!
//! ## How It Works
//! 1. [`build_matching`] pairs every descriptor of the smaller set with the
//!    nearest still-free descriptor of the larger set (greedy, order dependent)
//! 2. [`refine_matching`] shuffles that pairing with random pairwise swaps,
//!    keeping only swaps that don't raise the cost
//!
//! Neither step is globally optimal; the pair is a cheap heuristic.
//!
//! ## Example
//! ```rust,ignore
//! use descriptor_similarity::core::assignment::{build_matching, Refiner, RefinerConfig};
//!
//! let initial = build_matching(&smaller, &larger, 64)?;
//! let refined = Refiner::new(RefinerConfig::new().seed(7))
//!     .refine(&smaller, &larger, 64, &initial.matching)?;
//! println!("cost {} -> {}", initial.total_cost, refined.total_cost);
//! ```

mod builder;
mod matching;
mod refiner;

pub use builder::build_matching;
pub use matching::Matching;
pub use refiner::{refine_matching, RefinementResult, Refiner, RefinerConfig, DEFAULT_ITERATIONS};

use serde::{Deserialize, Serialize};

/// A matching together with its total cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub matching: Matching,
    /// Sum of squared Euclidean distances over all pairs
    pub total_cost: f64,
}
