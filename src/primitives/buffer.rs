//! Reusable scratch space for neighbor searches.
//!
//! ## Purpose
//!
//! Every row of the joint space is queried once per estimator invocation, and
//! the bootstrap repeats that for every replicate. This module keeps the search
//! heap and traversal stack alive across queries so the hot loop does not
//! allocate.
//!
//! ## Design notes
//!
//! * **Generic storage**: The search buffer is generic over the heap entry type
//!   so spatial indexes can choose their own ordering key.
//! * **One buffer per worker**: Buffers are passed explicitly, so parallel
//!   query loops hold one buffer per rayon task.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared (`clear()`), never shrunk.

// External dependencies
use std::collections::BinaryHeap;

/// Reusable heap and stack for k-nearest neighbor searches.
#[derive(Debug, Clone)]
pub struct NeighborhoodSearchBuffer<N> {
    pub(crate) heap: BinaryHeap<N>,
    pub(crate) stack: Vec<usize>,
}

impl<N: Ord> NeighborhoodSearchBuffer<N> {
    /// Create a new search buffer with capacity k.
    pub fn new(k: usize) -> Self {
        // Stack depth is bounded by tree height (~20 for 1M points).
        Self {
            heap: BinaryHeap::with_capacity(k),
            stack: Vec::with_capacity(32),
        }
    }

    /// Clear all internal buffers for reuse.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.stack.clear();
    }
}
