#![cfg(feature = "dev")]

use llcf_rs::internals::math::hull::{
    AutoHull, FacetEnumerationHull, HalfSpaces, Hull, HullBuilder, IncrementalHull, PlanarHull,
};
use rand::prelude::*;

const EPS: f64 = 1e-10;

fn unit_square() -> Vec<f64> {
    vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]
}

fn random_points(n: usize, dims: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * dims).map(|_| rng.random::<f64>()).collect()
}

fn hypercube(dims: usize) -> Vec<f64> {
    (0..1usize << dims)
        .flat_map(|i| (0..dims).map(move |j| ((i >> j) & 1) as f64))
        .collect()
}

/// Every face of `a` has a matching face in `b` and the counts agree.
fn same_faces(a: &HalfSpaces<f64>, b: &HalfSpaces<f64>) -> bool {
    a.faces() == b.faces()
        && (0..a.faces()).all(|i| {
            let (na, oa) = a.face(i);
            (0..b.faces()).any(|j| {
                let (nb, ob) = b.face(j);
                (oa - ob).abs() < 1e-8 && na.iter().zip(nb).all(|(u, v)| (u - v).abs() < 1e-8)
            })
        })
}

fn faces(hull: Hull<f64>) -> HalfSpaces<f64> {
    match hull {
        Hull::Bounded(faces) => faces,
        Hull::Degenerate => panic!("expected a bounded hull"),
    }
}

// ============================================================================
// Planar Hull
// ============================================================================

#[test]
fn test_planar_unit_square() {
    let hull = faces(PlanarHull.build(&unit_square(), 2));

    assert_eq!(hull.faces(), 4);
    assert_eq!(hull.dimensions(), 2);
    assert!(hull.contains(&[0.5, 0.5], EPS));
    assert!(hull.contains(&[1.0, 1.0], EPS));
    assert!(!hull.contains(&[1.5, 0.5], EPS));
}

#[test]
fn test_planar_interior_points_are_not_vertices() {
    let mut points = unit_square();
    points.extend_from_slice(&[0.5, 0.5, 0.25, 0.75, 0.5, 0.0]);

    let hull = faces(PlanarHull.build(&points, 2));
    assert_eq!(hull.faces(), 4);
}

#[test]
fn test_planar_collinear_is_degenerate() {
    let points = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
    assert!(PlanarHull.build(&points, 2).is_degenerate());
}

#[test]
fn test_too_few_points_is_degenerate() {
    let points = [0.0, 0.0, 1.0, 0.0];
    assert!(PlanarHull.build(&points, 2).is_degenerate());
    assert!(FacetEnumerationHull.build(&points, 2).is_degenerate());
}

#[test]
fn test_outward_normals_are_positive_outside() {
    let hull = faces(PlanarHull.build(&unit_square(), 2));

    for f in 0..hull.faces() {
        assert!(hull.evaluate(&[0.5, 0.5], f) < 0.0);
    }
    assert!((0..hull.faces()).any(|f| hull.evaluate(&[-1.0, 0.5], f) > 0.0));
}

// ============================================================================
// Facet Enumeration
// ============================================================================

#[test]
fn test_facet_enumeration_matches_planar_containment() {
    let mut points = unit_square();
    points.extend_from_slice(&[0.3, 0.6]);

    let planar = faces(PlanarHull.build(&points, 2));
    let general = faces(FacetEnumerationHull.build(&points, 2));

    assert_eq!(general.faces(), 4);
    let queries = [0.5, 0.5, 1.2, 0.5, 0.0, 0.0, -0.1, -0.1, 0.9, 0.99];
    for p in queries.chunks_exact(2) {
        assert_eq!(planar.contains(p, EPS), general.contains(p, EPS));
    }
}

#[test]
fn test_tetrahedron() {
    let points = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ];
    let hull = faces(FacetEnumerationHull.build(&points, 3));

    assert_eq!(hull.faces(), 4);
    assert!(hull.contains(&[0.1, 0.1, 0.1], EPS));
    assert!(!hull.contains(&[0.5, 0.5, 0.5], EPS));
}

#[test]
fn test_cube_merges_coplanar_facets() {
    let mut points = Vec::new();
    for i in 0..8 {
        points.extend_from_slice(&[(i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64]);
    }
    let hull = faces(FacetEnumerationHull.build(&points, 3));

    assert_eq!(hull.faces(), 6);
    assert!(hull.contains(&[0.5, 0.5, 0.5], EPS));
}

#[test]
fn test_coplanar_points_in_3d_are_degenerate() {
    let points = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        1.0, 1.0, 0.0,
    ];
    assert!(FacetEnumerationHull.build(&points, 3).is_degenerate());
}

// ============================================================================
// Containment Counting
// ============================================================================

#[test]
fn test_count_contained_includes_boundary() {
    let hull = faces(AutoHull.build(&unit_square(), 2));
    let data = [0.0, 0.0, 0.5, 0.5, 1.0, 0.5, 2.0, 2.0, -0.5, 0.0];

    assert_eq!(hull.count_contained(&data, EPS), 3);

    let mut mask = Vec::new();
    hull.containment_mask(&data, EPS, &mut mask);
    assert_eq!(mask, vec![true, true, true, false, false]);
}

// ============================================================================
// Incremental Hull
// ============================================================================

#[test]
fn test_incremental_matches_facet_enumeration_3d() {
    for seed in 0..5 {
        let points = random_points(20, 3, seed);
        let fast = faces(IncrementalHull.build(&points, 3));
        let exact = faces(FacetEnumerationHull.build(&points, 3));

        assert!(same_faces(&fast, &exact), "face sets differ for seed {seed}");
    }
}

#[test]
fn test_incremental_matches_facet_enumeration_4d() {
    for seed in 10..14 {
        let points = random_points(14, 4, seed);
        let fast = faces(IncrementalHull.build(&points, 4));
        let exact = faces(FacetEnumerationHull.build(&points, 4));

        assert!(same_faces(&fast, &exact), "face sets differ for seed {seed}");
    }
}

#[test]
fn test_incremental_matches_planar_in_2d() {
    let points = random_points(30, 2, 77);
    let fast = faces(IncrementalHull.build(&points, 2));
    let planar = faces(PlanarHull.build(&points, 2));

    assert!(same_faces(&fast, &planar));
}

#[test]
fn test_incremental_merges_coplanar_facets() {
    let cube = faces(IncrementalHull.build(&hypercube(3), 3));
    assert_eq!(cube.faces(), 6);

    let tesseract = faces(IncrementalHull.build(&hypercube(4), 4));
    assert_eq!(tesseract.faces(), 8);
    assert!(tesseract.contains(&[0.5, 0.5, 0.5, 0.5], EPS));
    assert!(!tesseract.contains(&[0.5, 0.5, 0.5, 1.5], EPS));
}

#[test]
fn test_incremental_encloses_every_point_in_5d() {
    let points = random_points(60, 5, 3);
    let hull = faces(AutoHull.build(&points, 5));

    assert_eq!(hull.dimensions(), 5);
    assert!(points.chunks_exact(5).all(|p| hull.contains(p, 1e-9)));
    assert!(!hull.contains(&[2.0, 0.5, 0.5, 0.5, 0.5], EPS));
}

#[test]
fn test_incremental_degenerate_inputs() {
    let coplanar = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.5, 0.5, 0.0,
    ];
    assert!(IncrementalHull.build(&coplanar, 3).is_degenerate());

    let too_few = random_points(3, 3, 5);
    assert!(IncrementalHull.build(&too_few, 3).is_degenerate());
}
