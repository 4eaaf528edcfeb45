//! Local zeta estimators.
//!
//! ## Purpose
//!
//! For every sample point, the local zeta measures how tightly its joint-space
//! neighbor set corresponds to a local region of one marginal space. With `k`
//! neighbors and `count` sample rows falling inside the region spanned by those
//! neighbors in the marginal space, `zeta = k / count`.
//!
//! ## Design notes
//!
//! * **Univariate**: The region is the closed interval `[min, max]` of the
//!   neighbor coordinates.
//! * **Multivariate**: The region is the convex hull of the neighbor points,
//!   tested through its half-space inequalities within a tolerance.
//! * **Generic hull**: Hull construction is injected through [`HullBuilder`].
//!
//! ## Key concepts
//!
//! * **Local invertibility**: `zeta == 1` means the region captures exactly the
//!   `k` neighbors and nothing else.
//! * **Undefined**: Degenerate neighbor sets yield [`LocalZeta::Undefined`],
//!   stored as NaN in zeta vectors.
//!
//! ## Invariants
//!
//! * Neighbor points always count as inside their own region, so defined
//!   values lie in `(0, 1]`. A neighbor that fails a face test through
//!   rounding is still counted once; other rows count only when they satisfy
//!   every face within the tolerance.
//! * Output vectors keep the input row order.
//!
//! ## Non-goals
//!
//! * This module does not search neighbors (see the engine).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::hull::{Hull, HullBuilder};
use crate::math::linalg::FloatLinalg;
use crate::primitives::layout::select_rows_into;

// ============================================================================
// Neighbor Table
// ============================================================================

/// The `k` joint-space neighbors of every row, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    indices: Vec<usize>,
    k: usize,
}

impl NeighborTable {
    /// Wrap a flat `n × k` index array.
    pub fn new(indices: Vec<usize>, k: usize) -> Self {
        debug_assert!(k > 0 && indices.len() % k == 0);
        Self { indices, k }
    }

    /// Neighborhood size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        if self.k == 0 {
            0
        } else {
            self.indices.len() / self.k
        }
    }

    /// Returns true if the table has no rows.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Neighbor indices of row `i`.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.indices[i * self.k..(i + 1) * self.k]
    }
}

// ============================================================================
// Local Zeta Value
// ============================================================================

/// Outcome of one local zeta computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalZeta<T> {
    /// Ratio `k / count`.
    Ratio(T),
    /// The neighbor set does not enclose a region.
    Undefined,
}

impl<T: Float> LocalZeta<T> {
    /// Numeric value, NaN when undefined.
    pub fn value(self) -> T {
        match self {
            LocalZeta::Ratio(v) => v,
            LocalZeta::Undefined => T::nan(),
        }
    }

    fn from_counts(k: usize, count: usize) -> Self {
        match (T::from(k), T::from(count)) {
            (Some(k), Some(c)) if count > 0 => LocalZeta::Ratio(k / c),
            _ => LocalZeta::Undefined,
        }
    }
}

// ============================================================================
// Per-Point Computation
// ============================================================================

/// Zeta from interval containment in a one-column space.
pub fn univariate_zeta<T: Float>(space: &[T], neighbors: &[usize]) -> LocalZeta<T> {
    let (lo, hi) = neighbors
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &j| {
            (lo.min(space[j]), hi.max(space[j]))
        });

    let count = space.iter().filter(|&&s| lo <= s && s <= hi).count();
    LocalZeta::from_counts(neighbors.len(), count)
}

/// Zeta from convex hull containment in a multi-column space.
///
/// `scratch` receives the neighbor coordinates and `mask` the per-row
/// containment flags; both are reused across calls.
pub fn multivariate_zeta<T, H>(
    space: &[T],
    dims: usize,
    neighbors: &[usize],
    tolerance: T,
    hull_builder: &H,
    scratch: &mut Vec<T>,
    mask: &mut Vec<bool>,
) -> LocalZeta<T>
where
    T: FloatLinalg,
    H: HullBuilder<T>,
{
    select_rows_into(space, dims, neighbors, scratch);

    let faces = match hull_builder.build(scratch, dims) {
        Hull::Bounded(faces) => faces,
        Hull::Degenerate => return LocalZeta::Undefined,
    };

    faces.containment_mask(space, tolerance, mask);
    let inside = mask.iter().filter(|&&m| m).count();

    // Neighbors sitting numerically outside their own hull still count
    let missed = neighbors.iter().filter(|&&j| !mask[j]).count();

    LocalZeta::from_counts(neighbors.len(), inside + missed)
}

// ============================================================================
// Vector Computation
// ============================================================================

/// Local zeta value of every row of one marginal space.
pub fn local_zetas<T, H>(
    space: &[T],
    dims: usize,
    table: &NeighborTable,
    tolerance: T,
    hull_builder: &H,
) -> Vec<T>
where
    T: FloatLinalg,
    H: HullBuilder<T>,
{
    let n = table.len();
    let mut zetas = Vec::with_capacity(n);

    if dims == 1 {
        for i in 0..n {
            zetas.push(univariate_zeta(space, table.neighbors(i)).value());
        }
    } else {
        let mut scratch = Vec::with_capacity(table.k() * dims);
        let mut mask = Vec::with_capacity(n);
        for i in 0..n {
            let zeta = multivariate_zeta(
                space,
                dims,
                table.neighbors(i),
                tolerance,
                hull_builder,
                &mut scratch,
                &mut mask,
            );
            zetas.push(zeta.value());
        }
    }

    zetas
}
