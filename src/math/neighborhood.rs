//! Spatial indexes for exact k-nearest neighbor search in the joint space.
//!
//! ## Purpose
//!
//! Local zeta values are defined over the `k` nearest rows of every joint-space
//! point (the point itself included). This module provides the search
//! structures behind that query: a KD-tree for the general case and a
//! brute-force scan for tiny or very high-dimensional samples.
//!
//! ## Design notes
//!
//! * **Static Construction**: Indexes are built once per estimator invocation and then only queried.
//! * **Eytzinger Layout**: KD-tree nodes are stored in a left-complete binary tree (array) layout for cache locality.
//! * **Trait-based Distance**: Supports any metric implementing [`PointDistance`].
//! * **Swappable Index**: Both indexes implement [`SpatialIndex`], so the estimator is generic over the search structure.
//!
//! ## Key concepts
//!
//! * **Splitting Plane**: The dimension and value used to split points at each node.
//! * **Implicit Navigation**: Child nodes are accessed via arithmetic ($2i+1$, $2i+2$) rather than pointers.
//! * **Pruning**: Skipping branches that cannot possibly contain nearer neighbors.
//! * **Tie Breaking**: Candidates are ordered by `(distance, index)`, so the
//!   returned set is the same for every index implementation.
//!
//! ## Invariants
//!
//! * Queries always return the exact nearest neighbors (no approximation).
//! * A query for a point stored in the index returns that point (distance zero).
//!
//! ## Non-goals
//!
//! * Dynamic insertions or deletions.
//! * Approximate nearest neighbor search.

// External dependencies
use core::cmp::Ordering::{self, Equal};
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::NeighborhoodSearchBuffer;

// ============================================================================
// Helper Types
// ============================================================================

/// Heap entry for k-nearest neighbor search.
///
/// Orders by distance (the second field), then by point index.
#[derive(Debug, Clone, Copy)]
pub struct NodeDistance<T>(pub usize, pub T);

impl<T: PartialOrd> PartialEq for NodeDistance<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Equal
    }
}
impl<T: PartialOrd> Eq for NodeDistance<T> {}

impl<T: PartialOrd> PartialOrd for NodeDistance<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialOrd> Ord for NodeDistance<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1
            .partial_cmp(&other.1)
            .unwrap_or(Equal)
            .then(self.0.cmp(&other.0))
    }
}

/// Distance hooks used by the spatial indexes.
pub trait PointDistance<T: Float> {
    /// Distance in comparison space (monotone in the true distance, e.g. squared Euclidean).
    fn reduced_distance(&self, a: &[T], b: &[T]) -> T;

    /// Comparison-space distance from a query coordinate to a splitting plane.
    fn reduced_split_distance(&self, dim: usize, split_val: T, query_val: T) -> T;

    /// Convert a comparison-space distance back to the metric space.
    fn post_process_distance(&self, d: T) -> T;
}

// ============================================================================
// Neighborhood Structure
// ============================================================================

/// Result container for k-nearest neighbor search.
#[derive(Debug, Clone)]
pub struct Neighborhood<T> {
    /// Indices of the k nearest neighbors (unordered).
    pub indices: Vec<usize>,
    /// Distances to each neighbor (corresponding to indices).
    pub distances: Vec<T>,
    /// Maximum distance in the neighborhood.
    pub max_distance: T,
}

impl<T: Float> Neighborhood<T> {
    /// Create a new empty neighborhood.
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            distances: Vec::new(),
            max_distance: T::zero(),
        }
    }

    /// Pre-allocate buffers for a neighborhood of size k.
    pub fn with_capacity(k: usize) -> Self {
        Self {
            indices: Vec::with_capacity(k),
            distances: Vec::with_capacity(k),
            max_distance: T::zero(),
        }
    }

    /// Returns the number of neighbors currently stored.
    #[inline]
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no neighbors are stored.
    #[inline]
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn reset(&mut self) {
        self.indices.clear();
        self.distances.clear();
        self.max_distance = T::zero();
    }

    /// Drain a finished search heap into this neighborhood.
    fn fill_from_heap<D: PointDistance<T>>(
        &mut self,
        buffer: &NeighborhoodSearchBuffer<NodeDistance<T>>,
        dist_calc: &D,
    ) {
        self.indices.clear();
        self.distances.clear();
        for &NodeDistance(idx, dist) in buffer.heap.iter() {
            self.indices.push(idx);
            self.distances.push(dist_calc.post_process_distance(dist));
        }
        let raw_max = buffer.heap.peek().map(|nd| nd.1).unwrap_or(T::zero());
        self.max_distance = dist_calc.post_process_distance(raw_max);
    }
}

impl<T: Float> Default for Neighborhood<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Spatial Index Capability
// ============================================================================

/// Exact k-nearest neighbor search over a fixed point set.
pub trait SpatialIndex<T: Float>: Sized {
    /// Build the index from a flattened row-major point array.
    fn build(points: &[T], dimensions: usize) -> Self;

    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Returns true if the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the `k` nearest indexed points to `query`.
    ///
    /// Uses the provided buffer and neighborhood to avoid allocations.
    fn find_k_nearest<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborhoodSearchBuffer<NodeDistance<T>>,
        neighborhood: &mut Neighborhood<T>,
    );
}

// ============================================================================
// KD-Tree Implementation
// ============================================================================

/// Node in the Eytzinger-ordered tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct KDNode {
    /// Index of the point in the original flattened data array.
    pub index: usize,
}

/// KD-tree for spatial indexing of nD points.
#[derive(Debug, Clone)]
pub struct KDTree<T: Float> {
    /// The implicit Eytzinger tree nodes.
    nodes: Vec<KDNode>,
    /// Permuted points aligned with the nodes for cache locality.
    points: Vec<T>,
    /// Dimensionality of the data.
    dimensions: usize,
}

impl<T: Float> KDTree<T> {
    /// Build a KD-tree from a flattened data array.
    ///
    /// The tree is built using a left-complete Eytzinger layout, reordering the
    /// input points so that each node's coordinates sit next to it in memory.
    pub fn new(points: &[T], dimensions: usize) -> Self {
        let n = if dimensions == 0 {
            0
        } else {
            points.len() / dimensions
        };
        let mut indices: Vec<usize> = (0..n).collect();

        let mut nodes = vec![KDNode::default(); n];
        let mut permuted_points = vec![T::zero(); n * dimensions];

        Self::build_recursive(
            points,
            dimensions,
            &mut indices,
            0,
            &mut nodes,
            &mut permuted_points,
            0,
        );

        Self {
            nodes,
            points: permuted_points,
            dimensions,
        }
    }

    /// Dimensionality of the indexed points.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Recursively builds the tree in Eytzinger layout.
    fn build_recursive(
        points: &[T],
        dims: usize,
        indices: &mut [usize],
        depth: usize,
        nodes: &mut [KDNode],
        permuted_points: &mut [T],
        curr_idx: usize,
    ) {
        if indices.is_empty() {
            return;
        }

        let axis = depth % dims;
        let n = indices.len();

        // Pivot rank for a left-complete tree keeps the Eytzinger property
        let median_idx = Self::calculate_left_subtree_size(n);

        if median_idx < n {
            indices.select_nth_unstable_by(median_idx, |&a, &b| {
                points[a * dims + axis]
                    .partial_cmp(&points[b * dims + axis])
                    .unwrap_or(Equal)
            });
        }

        let point_idx = indices[median_idx];
        nodes[curr_idx] = KDNode { index: point_idx };

        let src_start = point_idx * dims;
        let dest_start = curr_idx * dims;
        permuted_points[dest_start..dest_start + dims]
            .copy_from_slice(&points[src_start..src_start + dims]);

        let (left_part, right_part_with_median) = indices.split_at_mut(median_idx);
        let right_part = &mut right_part_with_median[1..];

        Self::build_recursive(
            points,
            dims,
            left_part,
            depth + 1,
            nodes,
            permuted_points,
            2 * curr_idx + 1,
        );
        Self::build_recursive(
            points,
            dims,
            right_part,
            depth + 1,
            nodes,
            permuted_points,
            2 * curr_idx + 2,
        );
    }

    /// Iterative search using an explicit stack for traversal.
    ///
    /// Stack entries pack `(node_idx, axis)` into a single `usize`:
    /// - `node_idx`: High bits (>> 8)
    /// - `axis`: Low 8 bits (& 0xFF)
    #[inline]
    fn search_iterative<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborhoodSearchBuffer<NodeDistance<T>>,
    ) {
        let d = self.dimensions;
        let heap = &mut buffer.heap;
        let stack = &mut buffer.stack;
        let nodes_len = self.nodes.len();

        let mut worst: Option<NodeDistance<T>> = None;

        if nodes_len > 0 {
            stack.push(0);
        }

        while let Some(packed) = stack.pop() {
            let axis = packed & 0xFF;
            let node_idx = packed >> 8;

            let node = self.nodes[node_idx];
            let offset = node_idx * d;
            let node_point = &self.points[offset..offset + d];

            // 1. Process current node
            let candidate = NodeDistance(node.index, dist_calc.reduced_distance(query, node_point));
            match worst {
                None => {
                    heap.push(candidate);
                    if heap.len() == k {
                        worst = heap.peek().copied();
                    }
                }
                Some(w) if candidate < w => {
                    if let Some(mut top) = heap.peek_mut() {
                        *top = candidate;
                    }
                    worst = heap.peek().copied();
                }
                Some(_) => {}
            }

            // 2. Leaf check: implicit left child is at 2*i + 1
            let left_child = 2 * node_idx + 1;
            if left_child >= nodes_len {
                continue;
            }

            let split_dim = axis;
            let split_val = node_point[split_dim];
            let diff = query[split_dim] - split_val;

            let right_child = left_child + 1;
            let has_right = right_child < nodes_len;
            let next_axis = if split_dim + 1 == d { 0 } else { split_dim + 1 };

            let packed_left = (left_child << 8) | next_axis;
            let packed_right = (right_child << 8) | next_axis;

            // Query on the left of (or on) the plane: near=left, far=right
            let (near_packed, far_packed, near_exists, far_exists) = if diff <= T::zero() {
                (packed_left, packed_right, true, has_right)
            } else {
                (packed_right, packed_left, has_right, true)
            };

            // 3. Far side may hold ties, so prune only on strictly larger plane distance
            if far_exists {
                let dist_to_plane =
                    dist_calc.reduced_split_distance(split_dim, split_val, query[split_dim]);
                match worst {
                    Some(w) if dist_to_plane > w.1 => {}
                    _ => stack.push(far_packed),
                }
            }

            // 4. Near side is explored first (pushed last)
            if near_exists {
                stack.push(near_packed);
            }
        }
    }

    /// Calculate number of nodes in the left subtree of a left-complete binary tree of size N.
    pub fn calculate_left_subtree_size(n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        // Height: H = floor(log2(n))
        let h = (usize::BITS - n.leading_zeros() - 1) as usize;
        if h == 0 {
            return 0;
        }

        let max_leaf_capacity = 1 << h;

        // Nodes in the last level
        let total_nodes_above_leaf = max_leaf_capacity - 1;
        let r = n - total_nodes_above_leaf;

        let left_part_leaves = r.min(max_leaf_capacity / 2);
        let left_subtree_capacity_full = (max_leaf_capacity / 2) - 1;
        left_subtree_capacity_full + left_part_leaves
    }
}

impl<T: Float> SpatialIndex<T> for KDTree<T> {
    fn build(points: &[T], dimensions: usize) -> Self {
        Self::new(points, dimensions)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn find_k_nearest<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborhoodSearchBuffer<NodeDistance<T>>,
        neighborhood: &mut Neighborhood<T>,
    ) {
        if k == 0 || self.nodes.is_empty() {
            neighborhood.reset();
            return;
        }

        buffer.clear();
        self.search_iterative(query, k, dist_calc, buffer);
        neighborhood.fill_from_heap(buffer, dist_calc);
    }
}

// ============================================================================
// Brute-Force Index
// ============================================================================

/// Linear-scan index.
///
/// Exact and allocation-free per query; preferable to the KD-tree when the
/// joint space has many dimensions relative to the sample size.
#[derive(Debug, Clone)]
pub struct BruteForceIndex<T> {
    points: Vec<T>,
    dimensions: usize,
}

impl<T: Float> SpatialIndex<T> for BruteForceIndex<T> {
    fn build(points: &[T], dimensions: usize) -> Self {
        Self {
            points: points.to_vec(),
            dimensions,
        }
    }

    fn len(&self) -> usize {
        if self.dimensions == 0 {
            0
        } else {
            self.points.len() / self.dimensions
        }
    }

    fn find_k_nearest<D: PointDistance<T>>(
        &self,
        query: &[T],
        k: usize,
        dist_calc: &D,
        buffer: &mut NeighborhoodSearchBuffer<NodeDistance<T>>,
        neighborhood: &mut Neighborhood<T>,
    ) {
        if k == 0 || self.is_empty() {
            neighborhood.reset();
            return;
        }

        buffer.clear();
        let heap = &mut buffer.heap;
        for (idx, point) in self.points.chunks_exact(self.dimensions).enumerate() {
            let candidate = NodeDistance(idx, dist_calc.reduced_distance(query, point));
            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(mut top) = heap.peek_mut() {
                if candidate < *top {
                    *top = candidate;
                }
            }
        }
        neighborhood.fill_from_heap(buffer, dist_calc);
    }
}
