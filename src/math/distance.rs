//! Minkowski-family distance metrics for joint-space neighbor search.
//!
//! ## Purpose
//!
//! Neighbor sets are defined in the joint space `J = [X | Y]`. This module
//! provides the metrics available for that search and the reduced-distance
//! hooks the KD-tree uses for pruning.
//!
//! ## Design notes
//!
//! * **Reduced distance**: Searches compare distances in a monotone "reduced"
//!   space (`Σ|d|^p` instead of its p-th root) and only convert the final
//!   neighbor distances back to the metric space.
//! * **Pruning bound**: The reduced distance to a splitting plane is a lower
//!   bound of the reduced distance to any point beyond it, for every metric
//!   here.
//!
//! ## Key concepts
//!
//! * **Metric**: Euclidean (p=2, default), Manhattan (p=1), Chebyshev
//!   (p=∞), or a general Minkowski p-norm with `p >= 1`.
//!
//! ## Invariants
//!
//! * Distances are non-negative and zero for identical points.
//!
//! ## Non-goals
//!
//! * Per-dimension weighting is not supported; inputs are expected to be
//!   rescaled by the normalizer instead.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::neighborhood::PointDistance;

// ============================================================================
// Distance Metric Enum
// ============================================================================

/// Distance metric for joint-space k-nearest neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric<T> {
    /// Standard Euclidean distance: √(Σ(xᵢ - yᵢ)²)
    #[default]
    Euclidean,

    /// Manhattan distance (L1 norm): Σ|xᵢ - yᵢ|
    Manhattan,

    /// Chebyshev distance (L∞ norm): max|xᵢ - yᵢ|
    Chebyshev,

    /// Minkowski distance (Lp norm): (Σ|xᵢ - yᵢ|^p)^(1/p)
    /// p must be >= 1.0.
    Minkowski(T),
}

// ============================================================================
// Distance Computation Functions
// ============================================================================

impl<T: Float> DistanceMetric<T> {
    /// Compute Euclidean distance between two points.
    #[inline]
    pub fn euclidean(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| {
                let diff = ai - bi;
                diff * diff
            })
            .fold(T::zero(), |acc, x| acc + x)
            .sqrt()
    }

    /// Compute Manhattan distance (L1 norm).
    #[inline]
    pub fn manhattan(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs())
            .fold(T::zero(), |acc, x| acc + x)
    }

    /// Compute Chebyshev distance (L-inf norm).
    #[inline]
    pub fn chebyshev(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs())
            .fold(T::zero(), T::max)
    }

    /// Compute Minkowski distance (Lp norm).
    #[inline]
    pub fn minkowski(a: &[T], b: &[T], p: T) -> T {
        debug_assert_eq!(a.len(), b.len());
        let sum_pow = a
            .iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs().powf(p))
            .fold(T::zero(), |acc, x| acc + x);
        sum_pow.powf(T::one() / p)
    }

    /// Compute the distance between two points under this metric.
    #[inline]
    pub fn distance(&self, a: &[T], b: &[T]) -> T {
        match *self {
            DistanceMetric::Euclidean => Self::euclidean(a, b),
            DistanceMetric::Manhattan => Self::manhattan(a, b),
            DistanceMetric::Chebyshev => Self::chebyshev(a, b),
            DistanceMetric::Minkowski(p) => Self::minkowski(a, b, p),
        }
    }

    /// Exponent of the equivalent p-norm (infinity for Chebyshev).
    pub fn power(&self) -> T {
        match *self {
            DistanceMetric::Euclidean => T::one() + T::one(),
            DistanceMetric::Manhattan => T::one(),
            DistanceMetric::Chebyshev => T::infinity(),
            DistanceMetric::Minkowski(p) => p,
        }
    }

    /// Reduce a single coordinate difference into comparison space.
    #[inline]
    fn reduce_component(&self, diff: T) -> T {
        let d = diff.abs();
        match *self {
            DistanceMetric::Euclidean => d * d,
            DistanceMetric::Manhattan | DistanceMetric::Chebyshev => d,
            DistanceMetric::Minkowski(p) => d.powf(p),
        }
    }
}

// ============================================================================
// KD-Tree Integration
// ============================================================================

impl<T: Float> PointDistance<T> for DistanceMetric<T> {
    #[inline]
    fn reduced_distance(&self, a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        let components = a
            .iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| self.reduce_component(ai - bi));
        match self {
            DistanceMetric::Chebyshev => components.fold(T::zero(), T::max),
            _ => components.fold(T::zero(), |acc, x| acc + x),
        }
    }

    #[inline]
    fn reduced_split_distance(&self, _dim: usize, split_val: T, query_val: T) -> T {
        self.reduce_component(query_val - split_val)
    }

    #[inline]
    fn post_process_distance(&self, d: T) -> T {
        match *self {
            DistanceMetric::Euclidean => d.sqrt(),
            DistanceMetric::Manhattan | DistanceMetric::Chebyshev => d,
            DistanceMetric::Minkowski(p) => d.powf(T::one() / p),
        }
    }
}
