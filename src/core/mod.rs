//! # Core Module
//!
//! The matching and scoring engine.
//!
//! ## Modules
//! - `descriptor` - Descriptor storage, validation and distances
//! - `assignment` - Greedy one-to-one matching and swap refinement
//! - `aggregate` - Threshold-filtered nearest-neighbour scoring
//! - `comparator` - Strategy selection and the comparison facade
//! - `batch` - Parallel ranking of many candidate sets

pub mod aggregate;
pub mod assignment;
pub mod batch;
pub mod comparator;
pub mod descriptor;

// Re-export commonly used types
pub use aggregate::{score_filtered_matches, DistanceEntry, FilterConfig};
pub use assignment::{build_matching, refine_matching, Matching, RefinerConfig};
pub use batch::{BatchComparator, BatchResult};
pub use comparator::{ComparatorConfig, Comparison, SimilarityStrategy, StrategyKind};
pub use descriptor::DescriptorSet;
