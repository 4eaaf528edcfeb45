//! Zeta adapter for the local zeta estimator.
//!
//! ## Purpose
//!
//! This module provides the execution adapter that runs only the local zeta
//! estimator: rescale, join, search neighbors, and compute the per-point zeta
//! vectors in both directions.
//!
//! ## Design notes
//!
//! * **Processing**: Processes the entire sample in a single pass.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * X and Y must hold the same number of rows.
//! * All values must be finite.
//! * Output order matches input order.
//!
//! ## Non-goals
//!
//! * This adapter does not bootstrap (use the bootstrap adapter).

// External dependencies
use core::fmt::Debug;

// Internal dependencies
use crate::engine::executor::{LlcfConfig, LlcfExecutor, NeighborSearch, NeighborhoodSize};
use crate::engine::output::ZetaResult;
use crate::engine::validator::Validator;
use crate::math::distance::DistanceMetric;
use crate::math::linalg::FloatLinalg;
use crate::math::scaling::ScalingMethod;
use crate::primitives::errors::LlcfError;

// ============================================================================
// Zeta Builder
// ============================================================================

/// Builder for the zeta estimator.
#[derive(Debug, Clone)]
pub struct ZetaLlcfBuilder<T: FloatLinalg> {
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

    /// Parallel execution hint
    pub parallel: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<LlcfError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg + Debug + Send + Sync> Default for ZetaLlcfBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg + Debug + Send + Sync> ZetaLlcfBuilder<T> {
    /// Create a new zeta builder with default parameters.
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
            parallel: defaults.parallel,
            deferred_error: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
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
    // Build Method
    // ========================================================================

    /// Build the zeta estimator.
    pub fn build(self) -> Result<ZetaLlcf<T>, LlcfError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_distance_metric(&self.distance_metric)?;

        Ok(ZetaLlcf {
            config: LlcfConfig {
                k: self.k,
                scaling: self.scaling,
                distance_metric: self.distance_metric,
                tolerance: self.tolerance,
                neighbor_search: self.neighbor_search,
                parallel: self.parallel,
                x_dimensions: self.x_dimensions,
                y_dimensions: self.y_dimensions,
                ..LlcfConfig::default()
            },
        })
    }
}

// ============================================================================
// Zeta Estimator
// ============================================================================

/// Local zeta estimator.
#[derive(Debug, Clone)]
pub struct ZetaLlcf<T> {
    config: LlcfConfig<T>,
}

impl<T: FloatLinalg + Debug + Send + Sync> ZetaLlcf<T> {
    /// Compute the local zeta vectors of a paired sample.
    ///
    /// `x` and `y` are row-major with the configured column counts.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<ZetaResult<T>, LlcfError> {
        let config = &self.config;
        let n = Validator::validate_inputs(x, config.x_dimensions, y, config.y_dimensions)?;
        Validator::validate_neighborhood_size(config.k.resolve(n), n)?;

        let output = LlcfExecutor::run_zetas(x, y, config);

        Ok(ZetaResult {
            zeta_x: output.zeta_x,
            zeta_y: output.zeta_y,
            k: output.k,
            n,
            x_dimensions: config.x_dimensions,
            y_dimensions: config.y_dimensions,
            scaling: config.scaling,
        })
    }

    /// The resolved run configuration.
    pub fn config(&self) -> &LlcfConfig<T> {
        &self.config
    }
}
