//! Percentile bootstrap confidence intervals.
//!
//! ## Purpose
//!
//! Turns the bootstrap distribution of deviations from the observed
//! probability into a confidence interval, and reports whether the interval
//! supports the hypothesis that the probability of local invertibility is one.
//!
//! ## Design notes
//!
//! * **Basic percentile form**: The interval is `center + q(dev, alpha)` to
//!   `center + q(dev, 1 - alpha)`, with `q` the linear-interpolation empirical
//!   quantile.
//! * **Degenerate distributions**: Identical deviations give a zero-width
//!   interval; no deviations give the point interval at the center.
//!
//! ## Invariants
//!
//! * `lower <= upper` whenever `alpha < 0.5`.

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::math::quantile::quantile_inplace;

// ============================================================================
// Confidence Interval
// ============================================================================

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
}

impl<T: Float> ConfidenceInterval<T> {
    /// Create an interval from its bounds.
    pub fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// Percentile interval around `center` from bootstrap deviations.
    ///
    /// `deviations` is reordered in place.
    pub fn from_deviations(center: T, deviations: &mut [T], alpha: T) -> Self {
        let lo = quantile_inplace(deviations, alpha);
        let hi = quantile_inplace(deviations, T::one() - alpha);
        Self::new(center + lo, center + hi)
    }

    /// Whether `value` lies in the closed interval.
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether the null hypothesis `P(zeta == 1) = 1` is accepted.
    pub fn accepts_invertibility(&self) -> bool {
        self.contains(T::one())
    }

    /// Upper minus lower bound.
    pub fn width(&self) -> T {
        self.upper - self.lower
    }

    /// Center of the interval.
    pub fn midpoint(&self) -> T {
        (self.lower + self.upper) / (T::one() + T::one())
    }

    /// Bounds as a `(lower, upper)` tuple.
    pub fn bounds(&self) -> (T, T) {
        (self.lower, self.upper)
    }
}

impl<T: Float + fmt::Display> fmt::Display for ConfidenceInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}
