//! Event type definitions for progress reporting.

use crate::core::comparator::StrategyKind;
use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};

/// All events emitted by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Batch ranking events
    Batch(BatchEvent),
}

impl From<BatchEvent> for Event {
    fn from(event: BatchEvent) -> Self {
        Event::Batch(event)
    }
}

/// Events while ranking candidate sets against a query set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    /// Ranking has started
    Started {
        total_candidates: usize,
        strategy: StrategyKind,
    },
    /// Progress update
    Progress(BatchProgress),
    /// A candidate was scored
    CandidateScored { index: usize, score: f64 },
    /// A candidate could not be scored; ranking continues
    CandidateFailed {
        index: usize,
        kind: ErrorKind,
        message: String,
    },
    /// Ranking completed
    Completed {
        scored: usize,
        failed: usize,
        duration_ms: u64,
    },
}

/// Progress information during batch ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Candidates finished so far (scored or failed)
    pub completed: usize,
    /// Total number of candidates
    pub total: usize,
}

impl BatchProgress {
    /// Completion as a percentage (0-100)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent() {
        let progress = BatchProgress {
            completed: 5,
            total: 20,
        };
        assert_eq!(progress.percent(), 25.0);

        let empty = BatchProgress {
            completed: 0,
            total: 0,
        };
        assert_eq!(empty.percent(), 100.0);
    }
}
