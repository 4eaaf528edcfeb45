//! Bootstrap adapter for the full LLCF hypothesis test.
//!
//! ## Purpose
//!
//! This module provides the execution adapter that runs the complete test:
//! full-sample zetas, the observed probability of local invertibility, and
//! percentile bootstrap confidence intervals for both directions.
//!
//! ## Design notes
//!
//! * **Randomness**: `fit` uses the configured seed (or OS entropy when none is
//!   set); `fit_with_rng` takes any caller-owned `rand::Rng`.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * X and Y must hold the same number of rows.
//! * All values must be finite.
//! * The same seed and configuration always give the same intervals.
//!
//! ## Non-goals
//!
//! * This adapter does not draw or plot the bootstrap distribution.

// External dependencies
use core::fmt::Debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Internal dependencies
use crate::engine::executor::{LlcfConfig, LlcfExecutor, NeighborSearch, NeighborhoodSize};
use crate::engine::output::LlcfResult;
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMetric;
use crate::math::linalg::FloatLinalg;
use crate::math::scaling::ScalingMethod;
use crate::primitives::errors::LlcfError;

// ============================================================================
// Bootstrap Builder
// ============================================================================

/// Builder for the bootstrap LLCF test.
#[derive(Debug, Clone)]
pub struct BootstrapLlcfBuilder<T: FloatLinalg> {
    /// Neighborhood size
    pub k: NeighborhoodSize,

    /// Column rescaling
    pub scaling: ScalingMethod,

    /// Joint-space distance metric
    pub distance_metric: DistanceMetric<T>,

    /// Hull containment tolerance
    pub tolerance: T,

    /// Spatial index for neighbor queries
    pub neighbor_search: NeighborSearch,

    /// Columns of X
    pub x_dimensions: usize,

    /// Columns of Y
    pub y_dimensions: usize,

    /// Number of bootstrap iterations
    pub iterations: usize,

    /// Significance level
    pub alpha: T,

    /// Two-sided trimming fraction
    pub gamma: T,

    /// Seed for the bootstrap random source
    pub seed: Option<u64>,

    /// Parallel execution hint
    pub parallel: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<LlcfError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg + Debug + Send + Sync> Default for BootstrapLlcfBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg + Debug + Send + Sync> BootstrapLlcfBuilder<T> {
    /// Create a new bootstrap builder with default parameters.
    fn new() -> Self {
        let defaults = LlcfConfig::<T>::default();
        Self {
            k: defaults.k,
            scaling: defaults.scaling,
            distance_metric: defaults.distance_metric,
            tolerance: defaults.tolerance,
            neighbor_search: defaults.neighbor_search,
            x_dimensions: defaults.x_dimensions,
            y_dimensions: defaults.y_dimensions,
            iterations: defaults.iterations,
            alpha: defaults.alpha,
            gamma: defaults.gamma,
            seed: None,
            parallel: defaults.parallel,
            deferred_error: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the neighborhood size.
    pub fn k(mut self, k: impl Into<NeighborhoodSize>) -> Self {
        self.k = k.into();
        self
    }

    /// Set the column rescaling method.
    pub fn scaling(mut self, method: ScalingMethod) -> Self {
        self.scaling = method;
        self
    }

    /// Set the joint-space distance metric.
    pub fn distance_metric(mut self, metric: DistanceMetric<T>) -> Self {
        self.distance_metric = metric;
        self
    }

    /// Set the hull containment tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the spatial index.
    pub fn neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.neighbor_search = search;
        self
    }

    /// Set the column counts of X and Y.
    pub fn dimensions(mut self, x_dimensions: usize, y_dimensions: usize) -> Self {
        self.x_dimensions = x_dimensions;
        self.y_dimensions = y_dimensions;
        self
    }

    /// Set parallel execution hint.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    // ========================================================================
    // Bootstrap-Specific Setters
    // ========================================================================

    /// Set the number of bootstrap iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the significance level.
    pub fn alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the two-sided trimming fraction.
    pub fn gamma(mut self, gamma: T) -> Self {
        self.gamma = gamma;
        self
    }

    /// Seed the bootstrap random source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the bootstrap test.
    pub fn build(self) -> Result<BootstrapLlcf<T>, LlcfError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_iterations(self.iterations)?;
        Validator::validate_alpha(self.alpha)?;
        Validator::validate_gamma(self.gamma)?;
        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_distance_metric(&self.distance_metric)?;

        Ok(BootstrapLlcf {
            config: LlcfConfig {
                k: self.k,
                scaling: self.scaling,
                distance_metric: self.distance_metric,
                tolerance: self.tolerance,
                neighbor_search: self.neighbor_search,
                parallel: self.parallel,
                x_dimensions: self.x_dimensions,
                y_dimensions: self.y_dimensions,
                iterations: self.iterations,
                alpha: self.alpha,
                gamma: self.gamma,
            },
            seed: self.seed,
        })
    }
}

// ============================================================================
// Bootstrap Test
// ============================================================================

/// Bootstrap LLCF test.
#[derive(Debug, Clone)]
pub struct BootstrapLlcf<T> {
    config: LlcfConfig<T>,
    seed: Option<u64>,
}

impl<T: FloatLinalg + Debug + Send + Sync> BootstrapLlcf<T> {
    /// Run the test with the configured seed, or OS entropy if none was set.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<LlcfResult<T>, LlcfError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.fit_with_rng(x, y, &mut rng)
    }

    /// Run the test drawing all randomness from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        x: &[T],
        y: &[T],
        rng: &mut R,
    ) -> Result<LlcfResult<T>, LlcfError> {
        let config = &self.config;
        let n = Validator::validate_inputs(x, config.x_dimensions, y, config.y_dimensions)?;
        Validator::validate_neighborhood_size(config.k.resolve(n), n)?;

        let output = LlcfExecutor::run_bootstrap(x, y, config, rng);

        Ok(LlcfResult {
            zeta_x: output.zetas.zeta_x,
            zeta_y: output.zetas.zeta_y,
            k: output.zetas.k,
            n,
            iterations: config.iterations,
            alpha: config.alpha,
            gamma: config.gamma,
            probability_x: output.probability_x,
            probability_y: output.probability_y,
            interval_x: output.interval_x,
            interval_y: output.interval_y,
            deviations_x: output.deviations_x,
            deviations_y: output.deviations_y,
        })
    }

    /// The resolved run configuration.
    pub fn config(&self) -> &LlcfConfig<T> {
        &self.config
    }
}
