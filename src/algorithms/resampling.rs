//! Bootstrap replicates of the paired sample.
//!
//! ## Purpose
//!
//! A bootstrap replicate draws `n` row indices with replacement. Because the
//! zeta estimator is geometric, repeated rows would only add duplicate points,
//! so each replicate is reduced to its distinct rows plus a draw count per row.
//! Statistics computed on the distinct rows are expanded back by those counts.
//!
//! ## Design notes
//!
//! * **Injected randomness**: Draws take any `rand::Rng`; nothing here touches
//!   global random state.
//! * **Counting sort**: Distinct rows come out sorted in one `O(n)` pass.
//!
//! ## Invariants
//!
//! * `counts` sum to the number of draws.
//! * Distinct row indices are strictly increasing.

// External dependencies
use num_traits::Float;
use rand::Rng;

// Internal dependencies
use crate::math::quantile::trimmed_mean_inplace;

// ============================================================================
// Replicate
// ============================================================================

/// One bootstrap replicate, reduced to distinct rows and multiplicities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replicate {
    unique: Vec<usize>,
    counts: Vec<usize>,
}

impl Replicate {
    /// Draw `n` rows with replacement from `0..n`.
    pub fn draw<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut tally = vec![0usize; n];
        for _ in 0..n {
            tally[rng.random_range(0..n)] += 1;
        }
        Self::from_tally(&tally)
    }

    /// Build a replicate from explicit draws over `0..n`.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn from_indices(indices: &[usize], n: usize) -> Self {
        let mut tally = vec![0usize; n];
        for &i in indices {
            tally[i] += 1;
        }
        Self::from_tally(&tally)
    }

    fn from_tally(tally: &[usize]) -> Self {
        let (unique, counts) = tally
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
            .unzip();
        Self { unique, counts }
    }

    /// Distinct row indices, ascending.
    pub fn unique(&self) -> &[usize] {
        &self.unique
    }

    /// Draw count of each distinct row.
    #[cfg_attr(not(feature = "dev"), allow(dead_code))]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of distinct rows.
    pub fn distinct(&self) -> usize {
        self.unique.len()
    }

    /// Total number of draws.
    pub fn draws(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Repeat each per-distinct-row value by its draw count.
    pub fn expand<T: Copy>(&self, values: &[T]) -> Vec<T> {
        debug_assert_eq!(values.len(), self.unique.len());
        let mut out = Vec::with_capacity(self.draws());
        for (&v, &c) in values.iter().zip(&self.counts) {
            out.extend(core::iter::repeat(v).take(c));
        }
        out
    }
}

// ============================================================================
// Indicator Statistics
// ============================================================================

/// Fraction of entries exactly equal to one; NaN entries count as not one.
pub fn fraction_equal_one<T: Float>(zetas: &[T]) -> T {
    if zetas.is_empty() {
        return T::zero();
    }
    let ones = zetas.iter().filter(|&&z| z == T::one()).count();
    T::from(ones).unwrap_or_else(T::zero) / T::from(zetas.len()).unwrap_or_else(T::one)
}

/// Gamma-trimmed mean of the `zeta == 1` indicator over the expanded replicate.
///
/// `gamma` is two-sided: `gamma / 2` is trimmed from each tail.
pub fn trimmed_indicator_mean<T: Float>(replicate: &Replicate, zetas: &[T], gamma: T) -> T {
    let mut indicators: Vec<T> = replicate
        .expand(zetas)
        .into_iter()
        .map(|z| if z == T::one() { T::one() } else { T::zero() })
        .collect();
    let per_tail = gamma / (T::one() + T::one());
    trimmed_mean_inplace(&mut indicators, per_tail)
}
