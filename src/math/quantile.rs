//! Empirical quantiles and trimmed means.
//!
//! ## Purpose
//!
//! The bootstrap reads its confidence bounds off empirical quantiles of the
//! deviation distribution, and summarizes each replicate by a trimmed mean of
//! zeta indicators. Both statistics live here.
//!
//! ## Design notes
//!
//! * **Quantile**: Linear interpolation between order statistics
//!   (`h = (m - 1)·q`), the common "type 7" definition.
//! * **Trimmed mean**: Symmetric trimming of `floor(fraction · m)` values from
//!   each tail of the sorted sample.
//! * **Selection**: Quantiles use `select_nth_unstable_by` instead of a full sort.
//!
//! ## Invariants
//!
//! * Quantiles of an empty sample are zero; quantiles of a constant sample
//!   equal that constant.
//! * The trimmed mean never discards every value.
//!
//! ## Non-goals
//!
//! * Weighted quantiles.
//! * Non-finite input handling (NaN sorts as equal to everything).

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Quantile
// ============================================================================

/// Linear-interpolation quantile of `vals` at probability `q` in `[0, 1]`.
///
/// # Safety
///
/// This function reorders the provided `vals` slice.
pub fn quantile_inplace<T: Float>(vals: &mut [T], q: T) -> T {
    let m = vals.len();
    if m == 0 {
        return T::zero();
    }
    if m == 1 {
        return vals[0];
    }

    let q = q.max(T::zero()).min(T::one());
    let h = T::from(m - 1).unwrap_or_else(T::zero) * q;
    let lo = h.floor().to_usize().unwrap_or(0).min(m - 1);
    let frac = h - h.floor();

    let (_, lower, upper_part) =
        vals.select_nth_unstable_by(lo, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let lower = *lower;

    if lo + 1 >= m || frac <= T::zero() {
        return lower;
    }

    // Next order statistic is the minimum of the upper partition
    let upper = upper_part.iter().copied().fold(T::infinity(), T::min);
    lower + frac * (upper - lower)
}

/// Linear-interpolation quantile without mutating the input.
#[cfg_attr(not(feature = "dev"), allow(dead_code))]
pub fn quantile<T: Float>(vals: &[T], q: T) -> T {
    let mut scratch = vals.to_vec();
    quantile_inplace(&mut scratch, q)
}

// ============================================================================
// Trimmed Mean
// ============================================================================

/// Mean after trimming `floor(proportion · m)` values from each tail.
///
/// `proportion` is the per-tail fraction and must be below one half; the
/// two-sided trimming parameter `gamma` maps to `proportion = gamma / 2`.
///
/// # Safety
///
/// This function sorts the provided `vals` slice.
pub fn trimmed_mean_inplace<T: Float>(vals: &mut [T], proportion: T) -> T {
    let m = vals.len();
    if m == 0 {
        return T::zero();
    }

    let cut = (T::from(m).unwrap_or_else(T::zero) * proportion)
        .floor()
        .to_usize()
        .unwrap_or(0);
    // Keep at least one value
    let cut = cut.min((m - 1) / 2);

    if cut > 0 {
        vals.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    }

    let kept = &vals[cut..m - cut];
    let sum = kept.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(kept.len()).unwrap_or_else(T::one)
}
