//! Convex hulls in half-space representation.
//!
//! ## Purpose
//!
//! The multivariate local zeta counts how many sample rows fall inside the
//! convex hull of a neighbor set. This module builds that hull as a list of
//! half-space inequalities `a·x + b <= 0` and evaluates sample rows against
//! them.
//!
//! ## Design notes
//!
//! * **Capability trait**: Hull construction sits behind [`HullBuilder`], so
//!   the estimator does not depend on a particular algorithm.
//! * **Explicit degeneracy**: Affinely dependent point sets produce
//!   [`Hull::Degenerate`] instead of a failure; callers decide how to report it.
//! * **Planar fast path**: Two-dimensional hulls use Andrew's monotone chain.
//! * **Incremental hull**: Higher dimensions use beneath-beyond insertion,
//!   whose work follows the number of facets rather than `C(k, d)`.
//! * **Exact fallback**: Facet enumeration tests every `d`-subset of points.
//!   It is combinatorial in `d` and only runs when rounding breaks the
//!   incremental result.
//!
//! ## Invariants
//!
//! * Face normals have unit length and point outward, so interior points give
//!   non-positive face values.
//! * Every input point satisfies every face within the construction tolerance.
//!
//! ## Non-goals
//!
//! * Vertex or simplex output; only the facet inequalities are produced.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;
use std::collections::HashMap;

// Internal dependencies
use crate::math::linalg::FloatLinalg;

// ============================================================================
// Half-Space Representation
// ============================================================================

/// A bounded convex hull as a set of outward-facing half-spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpaces<T> {
    /// Row-major face normals, one row per face.
    normals: Vec<T>,
    /// Per-face offsets `b` in `a·x + b <= 0`.
    offsets: Vec<T>,
    /// Dimensionality of the space.
    dimensions: usize,
}

impl<T: FloatLinalg> HalfSpaces<T> {
    /// Create an empty set of faces in `dimensions` dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self {
            normals: Vec::new(),
            offsets: Vec::new(),
            dimensions,
        }
    }

    /// Append a face with the given outward normal and offset.
    pub fn push_face(&mut self, normal: &[T], offset: T) {
        debug_assert_eq!(normal.len(), self.dimensions);
        self.normals.extend_from_slice(normal);
        self.offsets.push(offset);
    }

    /// Number of faces.
    pub fn faces(&self) -> usize {
        self.offsets.len()
    }

    /// Dimensionality of the hull.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Normal vector and offset of face `i`.
    pub fn face(&self, i: usize) -> (&[T], T) {
        let d = self.dimensions;
        (&self.normals[i * d..(i + 1) * d], self.offsets[i])
    }

    /// Value of `a·x + b` for one point and one face.
    #[inline]
    pub fn evaluate(&self, point: &[T], face: usize) -> T {
        let (normal, offset) = self.face(face);
        normal
            .iter()
            .zip(point)
            .fold(offset, |acc, (&a, &x)| acc + a * x)
    }

    /// Whether a point satisfies every face within `eps`.
    pub fn contains(&self, point: &[T], eps: T) -> bool {
        (0..self.faces()).all(|f| self.evaluate(point, f) <= eps)
    }

    /// Flag the rows of `data` that satisfy every face within `eps`.
    pub fn containment_mask(&self, data: &[T], eps: T, mask: &mut Vec<bool>) {
        T::containment_mask(data, self.dimensions, &self.normals, &self.offsets, eps, mask)
    }

    /// Count the rows of `data` that satisfy every face within `eps`.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn count_contained(&self, data: &[T], eps: T) -> usize {
        let mut mask = Vec::new();
        self.containment_mask(data, eps, &mut mask);
        mask.iter().filter(|&&inside| inside).count()
    }

    /// Whether an equivalent face is already stored.
    fn has_face(&self, normal: &[T], offset: T, tol: T) -> bool {
        (0..self.faces()).any(|f| {
            let (n, b) = self.face(f);
            (b - offset).abs() <= tol
                && n.iter().zip(normal).all(|(&u, &v)| (u - v).abs() <= tol)
        })
    }
}

/// Result of hull construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Hull<T> {
    /// A full-dimensional hull.
    Bounded(HalfSpaces<T>),
    /// The points are affinely dependent (or too few) to enclose a volume.
    Degenerate,
}

impl<T> Hull<T> {
    /// Returns true for a degenerate hull.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Hull::Degenerate)
    }
}

// ============================================================================
// Hull Construction Capability
// ============================================================================

/// Builds a half-space hull from a row-major point set.
pub trait HullBuilder<T: FloatLinalg> {
    /// Compute the hull of `points` (row-major, `dims` columns).
    fn build(&self, points: &[T], dims: usize) -> Hull<T>;
}

/// Relative singular-value threshold below which a direction counts as flat.
fn rank_tolerance<T: Float>() -> T {
    T::epsilon() * T::from(100.0).unwrap_or_else(T::one)
}

/// Absolute tolerance for side tests, scaled to the spread of the points.
fn side_tolerance<T: Float>(points: &[T]) -> T {
    let scale = points.iter().fold(T::one(), |acc, &v| acc.max(v.abs()));
    T::epsilon() * T::from(1.0e4).unwrap_or_else(T::one) * scale
}

/// Shared precondition: at least `d + 1` affinely independent points.
fn spans_full_dimension<T: FloatLinalg>(points: &[T], dims: usize) -> bool {
    if dims == 0 || points.len() < (dims + 1) * dims {
        return false;
    }
    T::affine_rank(points, dims, rank_tolerance()) == dims
}

#[inline]
fn row<T>(points: &[T], dims: usize, i: usize) -> &[T] {
    &points[i * dims..(i + 1) * dims]
}

#[inline]
fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::zero(), |acc, (&u, &v)| acc + u * v)
}

// ============================================================================
// Planar Hull (Monotone Chain)
// ============================================================================

/// Andrew's monotone chain for two-dimensional point sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarHull;

impl PlanarHull {
    #[inline]
    fn cross<T: Float>(o: [T; 2], a: [T; 2], b: [T; 2]) -> T {
        (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
    }

    /// Counter-clockwise hull vertices without collinear points.
    fn chain<T: Float>(points: &[T]) -> Vec<[T; 2]> {
        let mut pts: Vec<[T; 2]> = points.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        pts.sort_by(|a, b| {
            a[0].partial_cmp(&b[0])
                .unwrap_or(Equal)
                .then(a[1].partial_cmp(&b[1]).unwrap_or(Equal))
        });
        pts.dedup();

        if pts.len() < 3 {
            return pts;
        }

        let mut hull: Vec<[T; 2]> = Vec::with_capacity(2 * pts.len());
        for &p in pts.iter() {
            while hull.len() >= 2
                && Self::cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= T::zero()
            {
                hull.pop();
            }
            hull.push(p);
        }

        let lower_len = hull.len() + 1;
        for &p in pts.iter().rev().skip(1) {
            while hull.len() >= lower_len
                && Self::cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= T::zero()
            {
                hull.pop();
            }
            hull.push(p);
        }

        // Last point repeats the first
        hull.pop();
        hull
    }
}

impl<T: FloatLinalg> HullBuilder<T> for PlanarHull {
    fn build(&self, points: &[T], dims: usize) -> Hull<T> {
        if dims != 2 {
            return IncrementalHull.build(points, dims);
        }
        if !spans_full_dimension(points, dims) {
            return Hull::Degenerate;
        }

        let vertices = Self::chain(points);
        if vertices.len() < 3 {
            return Hull::Degenerate;
        }

        let m = vertices.len();
        let mut faces = HalfSpaces::new(2);
        for i in 0..m {
            let p = vertices[i];
            let q = vertices[(i + 1) % m];
            let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
            let len = (dx * dx + dy * dy).sqrt();
            if len <= T::zero() {
                continue;
            }

            // Interior lies to the left of a counter-clockwise edge
            let normal = [dy / len, -dx / len];
            let offset = -(normal[0] * p[0] + normal[1] * p[1]);
            faces.push_face(&normal, offset);
        }

        Hull::Bounded(faces)
    }
}

// ============================================================================
// General-Dimension Hull (Facet Enumeration)
// ============================================================================

/// Exact hull in any dimension by testing every `d`-subset as a facet.
///
/// A hyperplane through `d` points is a facet exactly when all remaining
/// points lie on one side of it. Runs in `O(C(k, d) · k · d)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacetEnumerationHull;

impl FacetEnumerationHull {
    /// Advance `idx` to the next `idx.len()`-combination of `0..n`.
    fn next_combination(idx: &mut [usize], n: usize) -> bool {
        let r = idx.len();
        let mut i = r;
        while i > 0 {
            i -= 1;
            if idx[i] < n - r + i {
                idx[i] += 1;
                for j in i + 1..r {
                    idx[j] = idx[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl<T: FloatLinalg> HullBuilder<T> for FacetEnumerationHull {
    fn build(&self, points: &[T], dims: usize) -> Hull<T> {
        if !spans_full_dimension(points, dims) {
            return Hull::Degenerate;
        }

        let n = points.len() / dims;
        let tol = side_tolerance(points);
        let rank_tol = rank_tolerance();

        let mut faces = HalfSpaces::new(dims);
        let mut subset = vec![T::zero(); dims * dims];
        let mut idx: Vec<usize> = (0..dims).collect();

        loop {
            for (slot, &row) in idx.iter().enumerate() {
                subset[slot * dims..(slot + 1) * dims]
                    .copy_from_slice(&points[row * dims..(row + 1) * dims]);
            }

            if let Some(normal) = T::hyperplane_normal(&subset, dims, rank_tol) {
                let offset = -normal
                    .iter()
                    .zip(&subset[..dims])
                    .fold(T::zero(), |acc, (&a, &x)| acc + a * x);

                let (lo, hi) = points.chunks_exact(dims).fold(
                    (T::infinity(), T::neg_infinity()),
                    |(lo, hi), p| {
                        let v = normal
                            .iter()
                            .zip(p)
                            .fold(offset, |acc, (&a, &x)| acc + a * x);
                        (lo.min(v), hi.max(v))
                    },
                );

                let oriented = if hi <= tol {
                    Some((normal, offset))
                } else if lo >= -tol {
                    Some((normal.iter().map(|&a| -a).collect(), -offset))
                } else {
                    None
                };

                if let Some((a, b)) = oriented {
                    if !faces.has_face(&a, b, tol) {
                        faces.push_face(&a, b);
                    }
                }
            }

            if !Self::next_combination(&mut idx, n) {
                break;
            }
        }

        if faces.faces() <= dims {
            return Hull::Degenerate;
        }
        Hull::Bounded(faces)
    }
}

// ============================================================================
// General-Dimension Hull (Beneath-Beyond)
// ============================================================================

/// Incremental hull in any dimension from two upward.
///
/// Starts from a wide initial simplex and inserts the remaining points one at
/// a time. A point beyond some facets replaces them with the cone from the
/// point to their horizon ridges; points beneath every facet are skipped.
/// Falls back to [`FacetEnumerationHull`] when rounding leaves an input point
/// outside the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalHull;

/// Simplicial facet: `d` sorted vertex rows and their outward hyperplane.
#[derive(Debug, Clone)]
struct Facet<T> {
    vertices: Vec<usize>,
    normal: Vec<T>,
    offset: T,
}

impl<T: Float> Facet<T> {
    #[inline]
    fn distance(&self, point: &[T]) -> T {
        dot(&self.normal, point) + self.offset
    }
}

impl IncrementalHull {
    /// Choose `d + 1` rows, each farthest from the affine span of the previous.
    fn initial_simplex<T: Float>(points: &[T], dims: usize, tol: T) -> Option<Vec<usize>> {
        let n = points.len() / dims;
        let first = (0..n).fold(0, |best, i| {
            if row(points, dims, i)[0] < row(points, dims, best)[0] {
                i
            } else {
                best
            }
        });
        let origin = row(points, dims, first);

        let mut chosen = vec![first];
        let mut basis: Vec<Vec<T>> = Vec::with_capacity(dims);

        while chosen.len() <= dims {
            let mut best: Option<(usize, T, Vec<T>)> = None;
            for i in (0..n).filter(|i| !chosen.contains(i)) {
                let mut residual: Vec<T> = row(points, dims, i)
                    .iter()
                    .zip(origin)
                    .map(|(&x, &o)| x - o)
                    .collect();
                for direction in &basis {
                    let projection = dot(&residual, direction);
                    for (r, &u) in residual.iter_mut().zip(direction) {
                        *r = *r - projection * u;
                    }
                }

                let norm = dot(&residual, &residual).sqrt();
                let farther = match &best {
                    Some((_, b, _)) => norm > *b,
                    None => true,
                };
                if farther {
                    best = Some((i, norm, residual));
                }
            }

            let (i, norm, residual) = best?;
            if norm <= tol {
                return None;
            }
            basis.push(residual.into_iter().map(|r| r / norm).collect());
            chosen.push(i);
        }

        Some(chosen)
    }

    /// Facet through `vertices`, oriented away from `interior`.
    fn facet<T: FloatLinalg>(
        points: &[T],
        dims: usize,
        mut vertices: Vec<usize>,
        interior: &[T],
        rank_tol: T,
    ) -> Option<Facet<T>> {
        vertices.sort_unstable();
        let mut subset = Vec::with_capacity(dims * dims);
        for &v in &vertices {
            subset.extend_from_slice(row(points, dims, v));
        }

        let mut normal = T::hyperplane_normal(&subset, dims, rank_tol)?;
        let mut offset = -dot(&normal, &subset[..dims]);
        if dot(&normal, interior) + offset > T::zero() {
            normal.iter_mut().for_each(|a| *a = -*a);
            offset = -offset;
        }

        Some(Facet {
            vertices,
            normal,
            offset,
        })
    }

    /// Beneath-beyond insertion; `None` asks the caller for the exact fallback.
    fn insert_all<T: FloatLinalg>(points: &[T], dims: usize) -> Option<HalfSpaces<T>> {
        let n = points.len() / dims;
        let tol = side_tolerance(points);
        let rank_tol = rank_tolerance();

        let simplex = Self::initial_simplex(points, dims, tol)?;
        let mut interior = vec![T::zero(); dims];
        for &v in &simplex {
            for (c, &x) in interior.iter_mut().zip(row(points, dims, v)) {
                *c = *c + x;
            }
        }
        let corners = T::from(dims + 1)?;
        interior.iter_mut().for_each(|c| *c = *c / corners);

        let mut facets = Vec::with_capacity(dims + 1);
        for skip in 0..=dims {
            let vertices = simplex
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != skip)
                .map(|(_, &v)| v)
                .collect();
            facets.push(Self::facet(points, dims, vertices, &interior, rank_tol)?);
        }

        let mut ridge_count: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut ridges: Vec<Vec<usize>> = Vec::new();

        for p in (0..n).filter(|p| !simplex.contains(p)) {
            let point = row(points, dims, p);
            let (visible, beneath): (Vec<Facet<T>>, Vec<Facet<T>>) =
                facets.into_iter().partition(|f| f.distance(point) > tol);
            facets = beneath;
            if visible.is_empty() {
                continue;
            }

            // Horizon ridges belong to exactly one visible facet
            ridge_count.clear();
            for facet in &visible {
                for skip in 0..dims {
                    let ridge: Vec<usize> = facet
                        .vertices
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != skip)
                        .map(|(_, &v)| v)
                        .collect();
                    let seen = ridge_count.entry(ridge.clone()).or_insert(0);
                    if *seen == 0 {
                        ridges.push(ridge);
                    }
                    *seen += 1;
                }
            }

            for ridge in ridges.drain(..) {
                if ridge_count.get(&ridge) == Some(&1) {
                    let mut vertices = ridge;
                    vertices.push(p);
                    facets.push(Self::facet(points, dims, vertices, &interior, rank_tol)?);
                }
            }
        }

        let mut faces = HalfSpaces::new(dims);
        for facet in &facets {
            if !faces.has_face(&facet.normal, facet.offset, tol) {
                faces.push_face(&facet.normal, facet.offset);
            }
        }

        let slack = tol * T::from(10.0)?;
        let encloses = points.chunks_exact(dims).all(|p| faces.contains(p, slack));
        if !encloses || faces.faces() <= dims {
            return None;
        }
        Some(faces)
    }
}

impl<T: FloatLinalg> HullBuilder<T> for IncrementalHull {
    fn build(&self, points: &[T], dims: usize) -> Hull<T> {
        if dims < 2 {
            return FacetEnumerationHull.build(points, dims);
        }
        if !spans_full_dimension(points, dims) {
            return Hull::Degenerate;
        }

        match Self::insert_all(points, dims) {
            Some(faces) => Hull::Bounded(faces),
            None => FacetEnumerationHull.build(points, dims),
        }
    }
}

// ============================================================================
// Dimension Dispatch
// ============================================================================

/// Picks the planar hull in two dimensions and the incremental hull otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoHull;

impl<T: FloatLinalg> HullBuilder<T> for AutoHull {
    fn build(&self, points: &[T], dims: usize) -> Hull<T> {
        if dims == 2 {
            PlanarHull.build(points, dims)
        } else {
            IncrementalHull.build(points, dims)
        }
    }
}
