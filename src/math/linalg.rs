//! Linear algebra backend for convex hull construction and containment.
//!
//! ## Purpose
//!
//! This module bridges the generic `Float` code of the estimator to nalgebra
//! for the three dense operations hull containment needs: the affine rank of a
//! neighbor set, the unit normal of a hyperplane through `d` points, and the
//! batched evaluation of every half-space inequality against the full sample.
//!
//! ## Design notes
//!
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to
//!   concrete nalgebra routines.
//! * Rank and normal computations use the SVD, which stays well defined for
//!   nearly degenerate point sets.
//! * Containment is one matrix product `S · Aᵀ` per hull instead of a
//!   per-row loop.

// External dependencies
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Affine rank of a row-major point set (rank of the centered points).
    ///
    /// Singular values at or below `rel_tol` times the largest one count as zero.
    fn affine_rank(points: &[Self], dims: usize, rel_tol: Self) -> usize;

    /// Unit normal of the hyperplane through exactly `dims` points.
    ///
    /// Returns `None` when the points do not span a hyperplane.
    fn hyperplane_normal(points: &[Self], dims: usize, rel_tol: Self) -> Option<Vec<Self>>;

    /// Mark the rows of `data` satisfying `a·x + b <= eps` for every face `(a, b)`.
    ///
    /// `normals` is row-major with one face per row; `mask` is overwritten with
    /// one flag per row.
    fn containment_mask(
        data: &[Self],
        dims: usize,
        normals: &[Self],
        offsets: &[Self],
        eps: Self,
        mask: &mut Vec<bool>,
    );
}

macro_rules! impl_float_linalg {
    ($t:ty, $rank:ident, $normal:ident, $count:ident) => {
        impl FloatLinalg for $t {
            #[inline]
            fn affine_rank(points: &[Self], dims: usize, rel_tol: Self) -> usize {
                nalgebra_backend::$rank(points, dims, rel_tol)
            }
            #[inline]
            fn hyperplane_normal(points: &[Self], dims: usize, rel_tol: Self) -> Option<Vec<Self>> {
                nalgebra_backend::$normal(points, dims, rel_tol)
            }
            #[inline]
            fn containment_mask(
                data: &[Self],
                dims: usize,
                normals: &[Self],
                offsets: &[Self],
                eps: Self,
                mask: &mut Vec<bool>,
            ) {
                nalgebra_backend::$count(data, dims, normals, offsets, eps, mask)
            }
        }
    };
}

impl_float_linalg!(f64, affine_rank_f64, hyperplane_normal_f64, containment_mask_f64);
impl_float_linalg!(f32, affine_rank_f32, hyperplane_normal_f32, containment_mask_f32);

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based implementations for each precision.
pub mod nalgebra_backend {
    use nalgebra::DMatrix;

    macro_rules! backend_fns {
        ($t:ty, $rank:ident, $normal:ident, $count:ident) => {
            /// Affine rank of a row-major point set.
            pub fn $rank(points: &[$t], dims: usize, rel_tol: $t) -> usize {
                if dims == 0 || points.len() < dims {
                    return 0;
                }
                let n = points.len() / dims;
                let mut centroid = vec![0.0 as $t; dims];
                for row in points.chunks_exact(dims) {
                    for (c, &v) in centroid.iter_mut().zip(row) {
                        *c += v;
                    }
                }
                for c in centroid.iter_mut() {
                    *c /= n as $t;
                }

                let centered = DMatrix::<$t>::from_fn(n, dims, |i, j| {
                    points[i * dims + j] - centroid[j]
                });
                let singular = centered.singular_values();
                let max_sv = singular.iter().cloned().fold(0.0 as $t, <$t>::max);
                if max_sv <= 0.0 {
                    return 0;
                }
                singular.iter().filter(|&&s| s > rel_tol * max_sv).count()
            }

            /// Unit normal of the hyperplane through `dims` row-major points.
            pub fn $normal(points: &[$t], dims: usize, rel_tol: $t) -> Option<Vec<$t>> {
                if dims == 0 || points.len() != dims * dims {
                    return None;
                }
                let origin = &points[..dims];

                // Spanning vectors in the first d-1 rows; the zero last row
                // keeps the matrix square so V carries the null direction.
                let spans = DMatrix::<$t>::from_fn(dims, dims, |i, j| {
                    if i + 1 < dims {
                        points[(i + 1) * dims + j] - origin[j]
                    } else {
                        0.0
                    }
                });

                let svd = spans.svd(false, true);
                let v_t = svd.v_t?;
                let singular = svd.singular_values;

                let mut order: Vec<usize> = (0..singular.len()).collect();
                order.sort_by(|&a, &b| {
                    singular[b]
                        .partial_cmp(&singular[a])
                        .unwrap_or(core::cmp::Ordering::Equal)
                });

                let max_sv = singular[order[0]];
                if dims > 1 {
                    // The d-1 spanning vectors must be independent
                    let weakest_span = singular[order[dims - 2]];
                    if max_sv <= 0.0 || weakest_span <= rel_tol * max_sv {
                        return None;
                    }
                }

                let null_row = order[dims - 1];
                let normal: Vec<$t> = v_t.row(null_row).iter().cloned().collect();
                let norm = normal.iter().map(|v| v * v).sum::<$t>().sqrt();
                if !(norm > 0.0) {
                    return None;
                }
                Some(normal.into_iter().map(|v| v / norm).collect())
            }

            /// Flag rows inside every half-space `a·x + b <= eps`.
            pub fn $count(
                data: &[$t],
                dims: usize,
                normals: &[$t],
                offsets: &[$t],
                eps: $t,
                mask: &mut Vec<bool>,
            ) {
                mask.clear();
                if dims == 0 {
                    return;
                }
                let n = data.len() / dims;
                let faces = offsets.len();
                if faces == 0 {
                    mask.resize(n, true);
                    return;
                }

                let samples = DMatrix::<$t>::from_row_slice(n, dims, data);
                let face_matrix = DMatrix::<$t>::from_row_slice(faces, dims, normals);
                let evaluated = samples * face_matrix.transpose();

                mask.extend(
                    (0..n).map(|i| (0..faces).all(|j| evaluated[(i, j)] + offsets[j] <= eps)),
                );
            }
        };
    }

    backend_fns!(f64, affine_rank_f64, hyperplane_normal_f64, containment_mask_f64);
    backend_fns!(f32, affine_rank_f32, hyperplane_normal_f32, containment_mask_f32);
}
