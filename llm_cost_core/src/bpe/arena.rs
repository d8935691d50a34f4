//! Per-encode scratch storage, reused across calls.
//!
//! Pipe-mode per-line allocation must be O(1) amortised with respect to
//! the page allocator, so `EncodeArena` is constructed once and
//! `.reset()` between encodes rather than rebuilt.

use std::collections::BinaryHeap;

use crate::Rank;

pub(crate) const NONE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Candidate {
    pub rank: Rank,
    pub left: u32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // BinaryHeap is a max-heap; reverse both fields so `pop()` yields
        // the minimum rank, and on a tie the smallest `left` slot (leftmost
        // wins ties, deterministic left-to-right merge order).
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.left.cmp(&self.left))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable per-encode working storage: the struct-of-arrays slot list plus
/// the lazy-deletion merge-candidate heap and a byte scratch buffer for
/// merge-rank lookups.
#[derive(Debug, Default)]
pub struct EncodeArena {
    pub(crate) token: Vec<Rank>,
    pub(crate) prev: Vec<u32>,
    pub(crate) next: Vec<u32>,
    pub(crate) valid: Vec<bool>,
    pub(crate) heap: BinaryHeap<Candidate>,
    pub(crate) scratch: Vec<u8>,
}

impl EncodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all buffers while retaining their allocated capacity, ready
    /// for the next `encode` call.
    pub fn reset(&mut self) {
        self.token.clear();
        self.prev.clear();
        self.next.clear();
        self.valid.clear();
        self.heap.clear();
        self.scratch.clear();
    }
}
