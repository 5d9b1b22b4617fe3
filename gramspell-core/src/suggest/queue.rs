//! Bounded top-N suggestion queue.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use gramspell_types::Suggestion;

/// Queue entry. Greater means better: higher score, then earlier insertion.
#[derive(Debug)]
struct Ranked {
    rank: f32,
    seq: u64,
    suggestion: Suggestion,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Holds at most `capacity` suggestions ordered by descending score.
///
/// When full, a new suggestion replaces the lowest-scoring one only if it
/// scores strictly higher; among equal scores the earliest inserted wins.
/// Unscored suggestions rank above every scored one.
#[derive(Debug)]
pub struct SuggestionQueue {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    next_seq: u64,
}

impl SuggestionQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(1024)),
            next_seq: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest score currently held, once the queue is full.
    ///
    /// Candidates scoring at or below this cannot enter.
    pub fn threshold(&self) -> Option<f32> {
        if self.heap.len() < self.capacity {
            return None;
        }
        self.heap.peek().map(|Reverse(worst)| worst.rank)
    }

    /// Offers a suggestion. Returns whether it was kept.
    pub fn push(&mut self, suggestion: Suggestion) -> bool {
        if self.capacity == 0 {
            return false;
        }

        let ranked = Ranked {
            rank: suggestion.score.unwrap_or(f32::INFINITY),
            seq: self.next_seq,
            suggestion,
        };
        self.next_seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(ranked));
            return true;
        }

        let beats_worst = self
            .heap
            .peek()
            .map_or(false, |Reverse(worst)| ranked > *worst);
        if beats_worst {
            self.heap.pop();
            self.heap.push(Reverse(ranked));
        }
        beats_worst
    }

    /// Drains the queue, best first.
    pub fn into_sorted_vec(self) -> Vec<Suggestion> {
        // Ascending order of Reverse is descending order of rank
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(ranked)| ranked.suggestion)
            .collect()
    }
}
