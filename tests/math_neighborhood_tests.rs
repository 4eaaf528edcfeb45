#![cfg(feature = "dev")]

use rand::prelude::*;

use llcf_rs::internals::math::distance::DistanceMetric;
use llcf_rs::internals::math::neighborhood::{
    BruteForceIndex, KDTree, Neighborhood, SpatialIndex,
};
use llcf_rs::internals::primitives::buffer::NeighborhoodSearchBuffer;

fn random_points(n: usize, dims: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * dims).map(|_| rng.random::<f64>()).collect()
}

fn sorted_neighbors<I: SpatialIndex<f64>>(
    index: &I,
    query: &[f64],
    k: usize,
    metric: &DistanceMetric<f64>,
) -> Vec<usize> {
    let mut buffer = NeighborhoodSearchBuffer::new(k);
    let mut nbh = Neighborhood::with_capacity(k);
    index.find_k_nearest(query, k, metric, &mut buffer, &mut nbh);
    let mut indices = nbh.indices.clone();
    indices.sort_unstable();
    indices
}

// ============================================================================
// KD-Tree Queries
// ============================================================================

#[test]
fn test_kdtree_simple_2d() {
    let points = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    let tree = KDTree::new(&points, 2);

    let k = 2;
    let mut buffer = NeighborhoodSearchBuffer::new(k);
    let mut nbh = Neighborhood::with_capacity(k);
    tree.find_k_nearest(&[0.2, 0.1], k, &DistanceMetric::Euclidean, &mut buffer, &mut nbh);

    assert_eq!(nbh.len(), 2);
    assert!(nbh.indices.contains(&0)); // (0,0) is closest
    assert!(nbh.indices.contains(&1)); // then (1,0)
}

#[test]
fn test_query_of_stored_point_returns_itself() {
    let points = random_points(50, 3, 1);
    let tree = KDTree::new(&points, 3);

    for i in 0..50 {
        let query = &points[i * 3..(i + 1) * 3];
        let neighbors = sorted_neighbors(&tree, query, 1, &DistanceMetric::Euclidean);
        assert_eq!(neighbors, vec![i]);
    }
}

#[test]
fn test_max_distance_is_kth_distance() {
    let points: Vec<f64> = vec![0.0, 1.0, 3.0, 6.0, 10.0];
    let tree = KDTree::new(&points, 1);

    let k = 3;
    let mut buffer = NeighborhoodSearchBuffer::new(k);
    let mut nbh = Neighborhood::with_capacity(k);
    tree.find_k_nearest(&[0.0], k, &DistanceMetric::Euclidean, &mut buffer, &mut nbh);

    assert_eq!(nbh.len(), 3);
    assert!((nbh.max_distance - 3.0).abs() < 1e-12);
}

#[test]
fn test_ties_broken_by_index() {
    // Query at 0 is equidistant from rows 1 and 2
    let points = vec![0.0, -1.0, 1.0, 5.0];

    let tree = KDTree::new(&points, 1);
    let brute = BruteForceIndex::build(&points, 1);

    let metric = DistanceMetric::Euclidean;
    assert_eq!(sorted_neighbors(&tree, &[0.0], 2, &metric), vec![0, 1]);
    assert_eq!(sorted_neighbors(&brute, &[0.0], 2, &metric), vec![0, 1]);
}

#[test]
fn test_k_zero_returns_empty() {
    let points = random_points(10, 2, 2);
    let tree = KDTree::new(&points, 2);

    let mut buffer = NeighborhoodSearchBuffer::new(1);
    let mut nbh = Neighborhood::with_capacity(1);
    tree.find_k_nearest(&[0.5, 0.5], 0, &DistanceMetric::Euclidean, &mut buffer, &mut nbh);

    assert!(nbh.is_empty());
}

// ============================================================================
// Index Agreement
// ============================================================================

#[test]
fn test_kdtree_matches_brute_force_for_every_metric() {
    let dims = 3;
    let points = random_points(120, dims, 7);
    let queries = random_points(25, dims, 8);

    let tree = KDTree::build(&points, dims);
    let brute = BruteForceIndex::build(&points, dims);
    assert_eq!(tree.len(), 120);
    assert_eq!(brute.len(), 120);

    for metric in [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::Chebyshev,
        DistanceMetric::Minkowski(3.0),
    ] {
        for query in queries.chunks_exact(dims) {
            for k in [1, 5, 11] {
                assert_eq!(
                    sorted_neighbors(&tree, query, k, &metric),
                    sorted_neighbors(&brute, query, k, &metric),
                    "metric {metric:?}, k = {k}"
                );
            }
        }
    }
}

#[test]
fn test_k_equal_to_n_returns_everything() {
    let points = random_points(16, 2, 9);
    let tree = KDTree::new(&points, 2);

    let neighbors = sorted_neighbors(&tree, &[0.5, 0.5], 16, &DistanceMetric::Manhattan);
    assert_eq!(neighbors, (0..16).collect::<Vec<_>>());
}

// ============================================================================
// Tree Layout
// ============================================================================

#[test]
fn test_left_subtree_size() {
    assert_eq!(KDTree::<f64>::calculate_left_subtree_size(1), 0);
    assert_eq!(KDTree::<f64>::calculate_left_subtree_size(2), 1);
    assert_eq!(KDTree::<f64>::calculate_left_subtree_size(3), 1);
    assert_eq!(KDTree::<f64>::calculate_left_subtree_size(7), 3);
}
