//! Column rescaling applied before any geometric computation.
//!
//! ## Purpose
//!
//! k-NN search in the joint space is sensitive to the relative scale of the
//! variables. This module rescales each sample matrix column by column so X and
//! Y contribute comparably to neighbor distances.
//!
//! ## Design notes
//!
//! * **Min-max** is an affine map, so it preserves local Lipschitz continuity
//!   exactly.
//! * **Rank** normalization is non-linear and preserves the property only
//!   asymptotically, but it is invariant to any strictly increasing transform
//!   of a column.
//! * **Pass-through** borrows the input instead of copying it.
//!
//! ## Invariants
//!
//! * Row order and row count are preserved.
//! * Min-max output lies in `[0, 1]` for finite input.
//! * A constant column is mapped to all zeros under min-max scaling.
//!
//! ## Non-goals
//!
//! * This module does not validate finiteness (done by the validator).

// External dependencies
use core::cmp::Ordering::Equal;
use core::str::FromStr;
use num_traits::Float;
use std::borrow::Cow;

// Internal dependencies
use crate::primitives::errors::LlcfError;

// ============================================================================
// Scaling Method
// ============================================================================

/// How each sample matrix is rescaled before neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMethod {
    /// Rescale each column to `[0, 1]`.
    #[default]
    MinMax,

    /// Replace each column by its average ranks (1-indexed).
    Rank,

    /// Use the data as given.
    None,
}

impl ScalingMethod {
    /// Rescale a row-major matrix with `dimensions` columns.
    pub fn apply<'a, T: Float>(&self, data: &'a [T], dimensions: usize) -> Cow<'a, [T]> {
        match self {
            ScalingMethod::None => Cow::Borrowed(data),
            ScalingMethod::MinMax => {
                let mut out = data.to_vec();
                for col in 0..dimensions {
                    Self::minmax_column(&mut out, dimensions, col);
                }
                Cow::Owned(out)
            }
            ScalingMethod::Rank => {
                let mut out = data.to_vec();
                let mut order = Vec::with_capacity(data.len() / dimensions.max(1));
                for col in 0..dimensions {
                    Self::rank_column(data, &mut out, dimensions, col, &mut order);
                }
                Cow::Owned(out)
            }
        }
    }

    /// Rescale both sample matrices of a pair.
    pub fn apply_pair<'a, T: Float>(
        &self,
        x: &'a [T],
        x_dims: usize,
        y: &'a [T],
        y_dims: usize,
    ) -> (Cow<'a, [T]>, Cow<'a, [T]>) {
        (self.apply(x, x_dims), self.apply(y, y_dims))
    }

    /// Min-max scale one column in place.
    fn minmax_column<T: Float>(data: &mut [T], dims: usize, col: usize) {
        let (min, max) = data
            .iter()
            .skip(col)
            .step_by(dims)
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let range = max - min;
        for v in data.iter_mut().skip(col).step_by(dims) {
            *v = if range > T::zero() {
                (*v - min) / range
            } else {
                T::zero()
            };
        }
    }

    /// Average-rank one column of `src` into `dst`.
    fn rank_column<T: Float>(
        src: &[T],
        dst: &mut [T],
        dims: usize,
        col: usize,
        order: &mut Vec<usize>,
    ) {
        let n = src.len() / dims;
        order.clear();
        order.extend(0..n);
        order.sort_by(|&a, &b| {
            src[a * dims + col]
                .partial_cmp(&src[b * dims + col])
                .unwrap_or(Equal)
        });

        let mut start = 0;
        while start < n {
            let value = src[order[start] * dims + col];
            let mut end = start + 1;
            while end < n && src[order[end] * dims + col] == value {
                end += 1;
            }

            // Ranks start..end (0-based) share the mean of their 1-based ranks
            let avg = T::from(start + end + 1).unwrap_or_else(T::nan) / (T::one() + T::one());
            for &row in &order[start..end] {
                dst[row * dims + col] = avg;
            }
            start = end;
        }
    }
}

impl FromStr for ScalingMethod {
    type Err = LlcfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minmax" | "min-max" | "min_max" => Ok(ScalingMethod::MinMax),
            "rank" => Ok(ScalingMethod::Rank),
            "none" | "" => Ok(ScalingMethod::None),
            _ => Err(LlcfError::UnknownScaling(s.to_string())),
        }
    }
}
