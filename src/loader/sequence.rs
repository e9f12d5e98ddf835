//! Emission sequencing
//!
//! One `SequenceState` spans every load call on a page, so interleaved
//! batches still form a single total order. Slots resolve in any order;
//! the drain hands back only the contiguous run starting at the emission
//! pointer, so dispatch is strictly ascending with no gaps.

use super::kind::ResolvedAsset;
use std::collections::HashMap;

/// Shared sequence and emission state
#[derive(Debug, Default)]
pub struct SequenceState {
    next_index: u64,
    next_to_emit: u64,
    pending: HashMap<u64, ResolvedAsset>,
}

impl SequenceState {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next sequence slot
    pub fn allocate(&mut self) -> u64 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Record a resolved slot and drain every slot that is now emittable
    ///
    /// Returns the contiguous run beginning at the emission pointer, in
    /// ascending index order; empty when an earlier slot is still
    /// outstanding.
    pub fn resolve(&mut self, asset: ResolvedAsset) -> Vec<ResolvedAsset> {
        self.pending.insert(asset.index, asset);

        let mut ready = Vec::new();
        while let Some(next) = self.pending.remove(&self.next_to_emit) {
            ready.push(next);
            self.next_to_emit += 1;
        }
        ready
    }

    /// Number of resolved slots still waiting on an earlier one
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
