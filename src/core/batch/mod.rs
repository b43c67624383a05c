//! # Batch Module
//!
//! Ranks many candidate descriptor sets against one query set.
//!
//! Candidates are compared in parallel with rayon. Every candidate gets its
//! own generator, seeded from the base seed and the candidate index, so a
//! seeded run ranks identically regardless of thread scheduling.
//! A candidate that fails to compare is reported and skipped; it never
//! aborts the batch.

use crate::core::comparator::{ComparatorConfig, Comparison, SimilarityStrategy};
use crate::core::descriptor::DescriptorSet;
use crate::error::{ErrorKind, Result};
use crate::events::{BatchEvent, BatchProgress, EventSender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::debug;

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// Position of the candidate in the input slice
    pub index: usize,
    pub comparison: Comparison,
}

/// A candidate that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub index: usize,
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of ranking a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Scored candidates, most similar (lowest score) first
    pub ranked: Vec<RankedCandidate>,
    /// Candidates that failed, in input order
    pub failures: Vec<CandidateFailure>,
    /// Base seed the per-candidate generators were derived from
    pub seed: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl BatchResult {
    /// The most similar candidate, if any was scored
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }
}

/// Compares a query set against many candidates in parallel
#[derive(Debug, Clone, Default)]
pub struct BatchComparator {
    config: ComparatorConfig,
}

impl BatchComparator {
    pub fn new(config: ComparatorConfig) -> Self {
        Self { config }
    }

    /// Rank candidates without progress events
    pub fn rank(&self, query: &DescriptorSet, candidates: &[DescriptorSet]) -> Result<BatchResult> {
        self.rank_with_events(query, candidates, &EventSender::disabled())
    }

    /// Rank candidates, reporting progress through `events`.
    ///
    /// # Errors
    /// Only configuration errors fail the whole batch; per-candidate errors
    /// land in [`BatchResult::failures`].
    pub fn rank_with_events(
        &self,
        query: &DescriptorSet,
        candidates: &[DescriptorSet],
        events: &EventSender,
    ) -> Result<BatchResult> {
        let start_time = Instant::now();
        let strategy = self.config.clone().build()?;
        let seed = self
            .config
            .refiner_config()
            .seed
            .unwrap_or_else(|| StdRng::from_entropy().gen());
        let total = candidates.len();

        events.send(BatchEvent::Started {
            total_candidates: total,
            strategy: strategy.kind(),
        });
        debug!(total, seed, strategy = %strategy.kind(), "Ranking candidates");

        let query_rows = query.rows();
        let completed = AtomicUsize::new(0);

        let outcomes: Vec<(usize, Result<Comparison>)> = candidates
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
                let outcome = strategy.compare_with_rng(
                    &query_rows,
                    &candidate.rows(),
                    query.descriptor_size(),
                    &mut rng,
                );

                match &outcome {
                    Ok(comparison) => events.send(BatchEvent::CandidateScored {
                        index,
                        score: comparison.score,
                    }),
                    Err(e) => events.send(BatchEvent::CandidateFailed {
                        index,
                        kind: e.kind(),
                        message: e.to_string(),
                    }),
                }

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(BatchEvent::Progress(BatchProgress {
                    completed: done,
                    total,
                }));

                (index, outcome)
            })
            .collect();

        let mut ranked = Vec::new();
        let mut failures = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(comparison) => ranked.push(RankedCandidate { index, comparison }),
                Err(e) => failures.push(CandidateFailure {
                    index,
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            }
        }
        ranked.sort_by(|a, b| {
            a.comparison
                .score
                .total_cmp(&b.comparison.score)
                .then(a.index.cmp(&b.index))
        });

        let duration_ms = start_time.elapsed().as_millis() as u64;
        events.send(BatchEvent::Completed {
            scored: ranked.len(),
            failed: failures.len(),
            duration_ms,
        });

        Ok(BatchResult {
            ranked,
            failures,
            seed,
            duration_ms,
        })
    }
}
