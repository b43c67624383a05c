//! Integration tests for batch ranking.
//!
//! These tests verify:
//! - Ranking order across many candidates
//! - Event delivery to a listener on another thread
//! - Per-candidate failures staying non-fatal

use descriptor_similarity::core::batch::BatchComparator;
use descriptor_similarity::core::{ComparatorConfig, DescriptorSet, StrategyKind};
use descriptor_similarity::events::{channel, BatchEvent, Event};
use std::thread;

fn shifted_set(offset: f32) -> DescriptorSet {
    let values: Vec<f32> = (0..6).map(|i| i as f32 + offset).collect();
    DescriptorSet::from_flat(values, 2).unwrap()
}

#[test]
fn batch_ranks_by_offset() {
    let query = shifted_set(0.0);
    let candidates: Vec<DescriptorSet> = [5.0, 0.0, 40.0, 0.5].iter().map(|&o| shifted_set(o)).collect();

    for strategy in [StrategyKind::GreedyWithRefinement, StrategyKind::ThresholdFilteredAggregate] {
        let comparator = BatchComparator::new(
            ComparatorConfig::new()
                .strategy(strategy)
                .iterations(100)
                .seed(8),
        );

        let result = comparator.rank(&query, &candidates).unwrap();

        let order: Vec<usize> = result.ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2], "strategy {}", strategy);
    }
}

#[test]
fn listener_thread_sees_every_candidate() {
    let (sender, receiver) = channel();
    let listener = thread::spawn(move || {
        let mut scored = Vec::new();
        for event in receiver.iter() {
            if let Event::Batch(BatchEvent::CandidateScored { index, .. }) = event {
                scored.push(index);
            }
        }
        scored.sort_unstable();
        scored
    });

    let query = shifted_set(0.0);
    let candidates: Vec<DescriptorSet> = (0..20).map(|i| shifted_set(i as f32 * 0.1)).collect();
    let comparator = BatchComparator::new(ComparatorConfig::new().iterations(50).seed(1));

    let result = comparator.rank_with_events(&query, &candidates, &sender).unwrap();
    drop(sender);

    let scored = listener.join().unwrap();
    assert_eq!(scored, (0..20).collect::<Vec<_>>());
    assert_eq!(result.ranked.len(), 20);
}

#[test]
fn mismatched_candidate_is_reported_not_fatal() {
    let query = shifted_set(0.0);
    let candidates = vec![
        shifted_set(1.0),
        DescriptorSet::from_flat(vec![0.0; 6], 3).unwrap(),
    ];
    let comparator = BatchComparator::new(ComparatorConfig::new().iterations(10).seed(2));

    let result = comparator.rank(&query, &candidates).unwrap();

    assert_eq!(result.ranked.len(), 1);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].index, 1);
    assert!(result.failures[0].message.contains("expected 2"));
}
