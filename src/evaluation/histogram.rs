//! Equal-width histograms of zeta vectors.
//!
//! ## Purpose
//!
//! Summarizes a zeta vector into bin edges and counts so callers can plot
//! the distribution of local zeta values without the crate drawing anything.
//!
//! ## Design notes
//!
//! * Bins span the finite range of the data; the rightmost bin is closed.
//! * A constant vector gets the unit-width range `[v - 0.5, v + 0.5]`.
//! * NaN (undefined) entries are counted apart from the bins.

// External dependencies
use num_traits::Float;

/// Bin edges and counts of a zeta vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZetaHistogram<T> {
    /// `bins + 1` ascending edges; empty when no entry is finite.
    pub edges: Vec<T>,
    /// Count per bin.
    pub counts: Vec<usize>,
    /// Number of undefined entries.
    pub undefined: usize,
}

impl<T: Float> ZetaHistogram<T> {
    /// Histogram of `values` with `bins` equal-width bins (at least one).
    pub fn from_values(values: &[T], bins: usize) -> Self {
        let bins = bins.max(1);
        let undefined = values.iter().filter(|v| !v.is_finite()).count();

        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if lo > hi {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
                undefined,
            };
        }

        let half = T::from(0.5).unwrap_or_else(T::one);
        let (lo, hi) = if lo == hi { (lo - half, hi + half) } else { (lo, hi) };

        let nb = T::from(bins).unwrap_or_else(T::one);
        let width = (hi - lo) / nb;
        let edges: Vec<T> = (0..=bins)
            .map(|i| lo + width * T::from(i).unwrap_or_else(T::zero))
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let pos = ((v - lo) / width).floor().to_usize().unwrap_or(0);
            counts[pos.min(bins - 1)] += 1;
        }

        Self {
            edges,
            counts,
            undefined,
        }
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of entries, defined or not.
    pub fn total(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.undefined
    }
}
