//! Execution engine for the zeta estimator and the bootstrap test.
//!
//! ## Purpose
//!
//! This module orchestrates a full run: rescale the paired sample, join it
//! into the joint space, build the neighbor table, compute the local zeta
//! vectors for both directions, and (for the test) repeat the estimator on
//! bootstrap replicates to form the confidence intervals.
//!
//! ## Design notes
//!
//! * **Scale once**: The bootstrap rescales the full sample once and runs every
//!   replicate on the already rescaled rows.
//! * **Derived streams**: One `u64` seed per iteration is drawn up front from
//!   the caller's random source, so sequential and parallel execution see the
//!   same replicates.
//! * **Sorted neighbor rows**: Each neighbor row is sorted by index, so every
//!   spatial index produces the same table.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Observed probability**: Fraction of full-sample zetas exactly equal to 1.
//! * **Deviation**: Replicate trimmed indicator mean minus the observed
//!   probability.
//!
//! ## Invariants
//!
//! * Zeta vectors have one entry per input row, in input order.
//! * `k` never exceeds the number of rows the estimator runs on.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not format results (handled by `output`).

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::resampling::{fraction_equal_one, trimmed_indicator_mean, Replicate};
use crate::algorithms::zeta::{local_zetas, NeighborTable};
use crate::evaluation::intervals::ConfidenceInterval;
use crate::math::distance::DistanceMetric;
use crate::math::hull::AutoHull;
use crate::math::linalg::FloatLinalg;
use crate::math::neighborhood::{
    BruteForceIndex, KDTree, Neighborhood, NodeDistance, SpatialIndex,
};
use crate::math::scaling::ScalingMethod;
use crate::primitives::buffer::NeighborhoodSearchBuffer;
use crate::primitives::layout::{concat_columns, row_count, select_rows};

// ============================================================================
// Neighborhood Size
// ============================================================================

/// Number of joint-space neighbors per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborhoodSize {
    /// `ceil(sqrt(n))` for a sample of `n` rows.
    #[default]
    Auto,

    /// A fixed neighbor count.
    Fixed(usize),
}

impl NeighborhoodSize {
    /// Neighbor count for a sample of `n` rows.
    pub fn resolve(&self, n: usize) -> usize {
        match *self {
            NeighborhoodSize::Auto => ((n as f64).sqrt().ceil() as usize).clamp(1, n.max(1)),
            NeighborhoodSize::Fixed(k) => k,
        }
    }

    /// Neighbor count for a bootstrap replicate with `n` distinct rows.
    ///
    /// A fixed count is capped at `n`.
    pub fn resolve_capped(&self, n: usize) -> usize {
        self.resolve(n).min(n)
    }
}

impl From<usize> for NeighborhoodSize {
    fn from(k: usize) -> Self {
        NeighborhoodSize::Fixed(k)
    }
}

// ============================================================================
// Neighbor Search Strategy
// ============================================================================

/// Spatial index used for the joint-space k-NN queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborSearch {
    /// KD-tree, `O(n log n)` queries in low dimension.
    #[default]
    KdTree,

    /// Linear scan, exact in any dimension.
    BruteForce,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for an estimator or bootstrap run.
#[derive(Debug, Clone)]
pub struct LlcfConfig<T> {
    /// Neighborhood size.
    pub k: NeighborhoodSize,

    /// Column rescaling applied before neighbor search.
    pub scaling: ScalingMethod,

    /// Joint-space distance metric.
    pub distance_metric: DistanceMetric<T>,

    /// Hull containment tolerance.
    pub tolerance: T,

    /// Spatial index for neighbor queries.
    pub neighbor_search: NeighborSearch,

    /// Run queries and iterations on the rayon pool.
    pub parallel: bool,

    /// Columns of X.
    pub x_dimensions: usize,

    /// Columns of Y.
    pub y_dimensions: usize,

    /// Bootstrap iterations.
    pub iterations: usize,

    /// Significance level.
    pub alpha: T,

    /// Two-sided trimming fraction.
    pub gamma: T,
}

impl<T: Float> Default for LlcfConfig<T> {
    fn default() -> Self {
        Self {
            k: NeighborhoodSize::Auto,
            scaling: ScalingMethod::MinMax,
            distance_metric: DistanceMetric::Euclidean,
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            neighbor_search: NeighborSearch::KdTree,
            parallel: false,
            x_dimensions: 1,
            y_dimensions: 1,
            iterations: 100,
            alpha: T::from(0.05).unwrap_or_else(T::epsilon),
            gamma: T::zero(),
        }
    }
}

// ============================================================================
// Executor Outputs
// ============================================================================

/// Zeta vectors of one estimator run.
#[derive(Debug, Clone, PartialEq)]
pub struct ZetaOutput<T> {
    /// Local zetas in X space.
    pub zeta_x: Vec<T>,

    /// Local zetas in Y space.
    pub zeta_y: Vec<T>,

    /// Neighborhood size used.
    pub k: usize,
}

/// Everything a bootstrap run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOutput<T> {
    /// Full-sample estimator output.
    pub zetas: ZetaOutput<T>,

    /// Observed probability of `zeta_x == 1`.
    pub probability_x: T,

    /// Observed probability of `zeta_y == 1`.
    pub probability_y: T,

    /// Interval for the X to Y direction.
    pub interval_x: ConfidenceInterval<T>,

    /// Interval for the Y to X direction.
    pub interval_y: ConfidenceInterval<T>,

    /// Replicate deviations for X, in iteration order.
    pub deviations_x: Vec<T>,

    /// Replicate deviations for Y, in iteration order.
    pub deviations_y: Vec<T>,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs the estimator and the bootstrap test.
pub struct LlcfExecutor;

impl LlcfExecutor {
    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Rescale the sample and compute both zeta vectors.
    pub fn run_zetas<T>(x: &[T], y: &[T], config: &LlcfConfig<T>) -> ZetaOutput<T>
    where
        T: FloatLinalg + Debug + Send + Sync,
    {
        let (xd, yd) = (config.x_dimensions, config.y_dimensions);
        let (xs, ys) = config.scaling.apply_pair(x, xd, y, yd);
        let k = config.k.resolve(row_count(x, xd));
        Self::zetas_prescaled(&xs, &ys, config, k, config.parallel)
    }

    /// Run the full bootstrap test with the given random source.
    pub fn run_bootstrap<T, R>(
        x: &[T],
        y: &[T],
        config: &LlcfConfig<T>,
        rng: &mut R,
    ) -> BootstrapOutput<T>
    where
        T: FloatLinalg + Debug + Send + Sync,
        R: Rng + ?Sized,
    {
        let (xd, yd) = (config.x_dimensions, config.y_dimensions);
        let n = row_count(x, xd);
        let (xs, ys) = config.scaling.apply_pair(x, xd, y, yd);

        let zetas = Self::zetas_prescaled(&xs, &ys, config, config.k.resolve(n), config.parallel);
        let probability_x = fraction_equal_one(&zetas.zeta_x);
        let probability_y = fraction_equal_one(&zetas.zeta_y);
        debug!(
            n,
            k = zetas.k,
            probability_x = probability_x.to_f64().unwrap_or(f64::NAN),
            probability_y = probability_y.to_f64().unwrap_or(f64::NAN),
            "full-sample zetas computed"
        );

        let seeds: Vec<u64> = (0..config.iterations).map(|_| rng.random()).collect();
        debug!(iterations = seeds.len(), "bootstrap started");

        let pairs =
            Self::replicate_deviations(&xs, &ys, config, n, &seeds, probability_x, probability_y);
        let (deviations_x, deviations_y): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        let mut sorted_x = deviations_x.clone();
        let mut sorted_y = deviations_y.clone();
        let interval_x = ConfidenceInterval::from_deviations(probability_x, &mut sorted_x, config.alpha);
        let interval_y = ConfidenceInterval::from_deviations(probability_y, &mut sorted_y, config.alpha);
        debug!(
            lower_x = interval_x.lower.to_f64().unwrap_or(f64::NAN),
            upper_x = interval_x.upper.to_f64().unwrap_or(f64::NAN),
            lower_y = interval_y.lower.to_f64().unwrap_or(f64::NAN),
            upper_y = interval_y.upper.to_f64().unwrap_or(f64::NAN),
            "bootstrap finished"
        );

        BootstrapOutput {
            zetas,
            probability_x,
            probability_y,
            interval_x,
            interval_y,
            deviations_x,
            deviations_y,
        }
    }

    // ========================================================================
    // Estimator
    // ========================================================================

    /// Compute both zeta vectors on already rescaled rows with a given `k`.
    pub fn zetas_prescaled<T>(
        xs: &[T],
        ys: &[T],
        config: &LlcfConfig<T>,
        k: usize,
        parallel: bool,
    ) -> ZetaOutput<T>
    where
        T: FloatLinalg + Debug + Send + Sync,
    {
        let (xd, yd) = (config.x_dimensions, config.y_dimensions);
        let joint = concat_columns(xs, xd, ys, yd);
        let table = Self::neighbor_table(
            &joint,
            xd + yd,
            k,
            &config.distance_metric,
            config.neighbor_search,
            parallel,
        );
        debug!(rows = table.len(), k, "neighbor table built");

        let hull = AutoHull;
        let zeta_x = local_zetas(xs, xd, &table, config.tolerance, &hull);
        let zeta_y = local_zetas(ys, yd, &table, config.tolerance, &hull);
        debug!(
            undefined_x = zeta_x.iter().filter(|z| z.is_nan()).count(),
            undefined_y = zeta_y.iter().filter(|z| z.is_nan()).count(),
            "local zetas computed"
        );

        ZetaOutput { zeta_x, zeta_y, k }
    }

    /// The `k` nearest joint-space rows of every row, each row sorted by index.
    pub fn neighbor_table<T>(
        joint: &[T],
        dims: usize,
        k: usize,
        metric: &DistanceMetric<T>,
        search: NeighborSearch,
        parallel: bool,
    ) -> NeighborTable
    where
        T: FloatLinalg + Debug + Send + Sync,
    {
        let indices = match search {
            NeighborSearch::KdTree => {
                let index = KDTree::build(joint, dims);
                Self::query_all(&index, joint, dims, k, metric, parallel)
            }
            NeighborSearch::BruteForce => {
                let index = BruteForceIndex::build(joint, dims);
                Self::query_all(&index, joint, dims, k, metric, parallel)
            }
        };
        NeighborTable::new(indices, k)
    }

    fn query_all<T, I>(
        index: &I,
        joint: &[T],
        dims: usize,
        k: usize,
        metric: &DistanceMetric<T>,
        parallel: bool,
    ) -> Vec<usize>
    where
        T: FloatLinalg + Debug + Send + Sync,
        I: SpatialIndex<T> + Sync,
    {
        let n = row_count(joint, dims);
        let mut out = vec![0usize; n * k];

        let fill = |slot: &mut [usize],
                    query: &[T],
                    buffer: &mut NeighborhoodSearchBuffer<NodeDistance<T>>,
                    nbh: &mut Neighborhood<T>| {
            index.find_k_nearest(query, k, metric, buffer, nbh);
            slot.copy_from_slice(&nbh.indices);
            slot.sort_unstable();
        };

        #[cfg(feature = "parallel")]
        if parallel {
            out.par_chunks_mut(k)
                .zip(joint.par_chunks(dims))
                .for_each_init(
                    || (NeighborhoodSearchBuffer::new(k), Neighborhood::with_capacity(k)),
                    |(buffer, nbh), (slot, query)| fill(slot, query, buffer, nbh),
                );
            return out;
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        let mut buffer = NeighborhoodSearchBuffer::new(k);
        let mut nbh = Neighborhood::with_capacity(k);
        for (slot, query) in out.chunks_mut(k).zip(joint.chunks_exact(dims)) {
            fill(slot, query, &mut buffer, &mut nbh);
        }
        out
    }

    // ========================================================================
    // Bootstrap
    // ========================================================================

    /// Deviation pair of one replicate.
    fn replicate_deviation<T>(
        xs: &[T],
        ys: &[T],
        config: &LlcfConfig<T>,
        n: usize,
        seed: u64,
        probabilities: (T, T),
    ) -> (T, T)
    where
        T: FloatLinalg + Debug + Send + Sync,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let replicate = Replicate::draw(n, &mut rng);

        let sub_x = select_rows(xs, config.x_dimensions, replicate.unique());
        let sub_y = select_rows(ys, config.y_dimensions, replicate.unique());
        let k = config.k.resolve_capped(replicate.distinct());

        let zetas = Self::zetas_prescaled(&sub_x, &sub_y, config, k, false);
        let mean_x = trimmed_indicator_mean(&replicate, &zetas.zeta_x, config.gamma);
        let mean_y = trimmed_indicator_mean(&replicate, &zetas.zeta_y, config.gamma);

        (mean_x - probabilities.0, mean_y - probabilities.1)
    }

    fn replicate_deviations<T>(
        xs: &[T],
        ys: &[T],
        config: &LlcfConfig<T>,
        n: usize,
        seeds: &[u64],
        probability_x: T,
        probability_y: T,
    ) -> Vec<(T, T)>
    where
        T: FloatLinalg + Debug + Send + Sync,
    {
        let probabilities = (probability_x, probability_y);
        let run = |(i, &seed): (usize, &u64)| {
            let (dx, dy) = Self::replicate_deviation(xs, ys, config, n, seed, probabilities);
            trace!(
                iteration = i,
                deviation_x = dx.to_f64().unwrap_or(f64::NAN),
                deviation_y = dy.to_f64().unwrap_or(f64::NAN),
                "bootstrap replicate"
            );
            (dx, dy)
        };

        // Iterations are the parallel loop; queries inside a replicate stay sequential
        #[cfg(feature = "parallel")]
        if config.parallel {
            return seeds.par_iter().enumerate().map(run).collect();
        }

        seeds.iter().enumerate().map(run).collect()
    }
}
