//! High-level API for the LLCF test.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the estimator and the bootstrap test, and
//! for choosing an execution adapter (Zeta or Bootstrap).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LlcfBuilder`] via `Llcf::new()`.
//! 2. Chain configuration methods (`.k()`, `.iterations()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Bootstrap)` to get an execution builder.

use core::fmt::Debug;

// Internal dependencies
use crate::math::linalg::FloatLinalg;

// Publicly re-exported types
pub use crate::adapters::bootstrap::{BootstrapLlcf, BootstrapLlcfBuilder};
pub use crate::adapters::zeta::{ZetaLlcf, ZetaLlcfBuilder};
pub use crate::engine::executor::{LlcfConfig, NeighborSearch, NeighborhoodSize};
pub use crate::engine::output::{LlcfResult, ZetaResult};
pub use crate::evaluation::histogram::ZetaHistogram;
pub use crate::evaluation::intervals::ConfidenceInterval;
pub use crate::math::distance::DistanceMetric;
pub use crate::math::scaling::ScalingMethod;
pub use crate::primitives::errors::LlcfError;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Bootstrap, Zeta};
}

/// Fluent builder for configuring LLCF parameters and execution modes.
#[derive(Debug, Clone)]
pub struct LlcfBuilder<T: FloatLinalg + Debug + Send + Sync> {
    /// Neighborhood size (default: `ceil(sqrt(n))`).
    pub k: Option<NeighborhoodSize>,

    /// Column rescaling (default: min-max).
    pub scaling: Option<ScalingMethod>,

    /// Joint-space distance metric (default: Euclidean).
    pub distance_metric: Option<DistanceMetric<T>>,

    /// Hull containment tolerance (default: 1e-10).
    pub tolerance: Option<T>,

    /// Spatial index for neighbor queries (default: KD-tree).
    pub neighbor_search: Option<NeighborSearch>,

    /// Columns of X (default: 1).
    pub x_dimensions: Option<usize>,

    /// Columns of Y (default: 1).
    pub y_dimensions: Option<usize>,

    /// Bootstrap iterations (Bootstrap only, default: 100).
    pub iterations: Option<usize>,

    /// Significance level (Bootstrap only, default: 0.05).
    pub alpha: Option<T>,

    /// Two-sided trimming fraction (Bootstrap only, default: 0).
    pub gamma: Option<T>,

    /// Seed for the bootstrap random source (Bootstrap only).
    pub seed: Option<u64>,

    /// Parallel execution hint.
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg + Debug + Send + Sync> Default for LlcfBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg + Debug + Send + Sync> LlcfBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: LlcfAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            k: None,
            scaling: None,
            distance_metric: None,
            tolerance: None,
            neighbor_search: None,
            x_dimensions: None,
            y_dimensions: None,
            iterations: None,
            alpha: None,
            gamma: None,
            seed: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the neighborhood size (a `usize` or a [`NeighborhoodSize`]).
    pub fn k(mut self, k: impl Into<NeighborhoodSize>) -> Self {
        if self.k.is_some() {
            self.duplicate_param = Some("k");
        }
        self.k = Some(k.into());
        self
    }

    /// Set the column rescaling method.
    pub fn scaling(mut self, method: ScalingMethod) -> Self {
        if self.scaling.is_some() {
            self.duplicate_param = Some("scaling");
        }
        self.scaling = Some(method);
        self
    }

    /// Set the joint-space distance metric.
    pub fn distance_metric(mut self, metric: DistanceMetric<T>) -> Self {
        if self.distance_metric.is_some() {
            self.duplicate_param = Some("distance_metric");
        }
        self.distance_metric = Some(metric);
        self
    }

    /// Set the hull containment tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the spatial index used for neighbor queries.
    pub fn neighbor_search(mut self, search: NeighborSearch) -> Self {
        if self.neighbor_search.is_some() {
            self.duplicate_param = Some("neighbor_search");
        }
        self.neighbor_search = Some(search);
        self
    }

    /// Set the number of columns of X.
    pub fn x_dimensions(mut self, dims: usize) -> Self {
        if self.x_dimensions.is_some() {
            self.duplicate_param = Some("x_dimensions");
        }
        self.x_dimensions = Some(dims);
        self
    }

    /// Set the number of columns of Y.
    pub fn y_dimensions(mut self, dims: usize) -> Self {
        if self.y_dimensions.is_some() {
            self.duplicate_param = Some("y_dimensions");
        }
        self.y_dimensions = Some(dims);
        self
    }

    /// Set the number of bootstrap iterations (Bootstrap only).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the significance level (Bootstrap only).
    pub fn alpha(mut self, alpha: T) -> Self {
        if self.alpha.is_some() {
            self.duplicate_param = Some("alpha");
        }
        self.alpha = Some(alpha);
        self
    }

    /// Set the two-sided trimming fraction (Bootstrap only).
    pub fn gamma(mut self, gamma: T) -> Self {
        if self.gamma.is_some() {
            self.duplicate_param = Some("gamma");
        }
        self.gamma = Some(gamma);
        self
    }

    /// Seed the bootstrap random source (Bootstrap only).
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Run neighbor queries and bootstrap iterations on the rayon pool.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait LlcfAdapter<T: FloatLinalg + Debug + Send + Sync> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`LlcfBuilder`] into a specialized execution builder.
    fn convert(builder: LlcfBuilder<T>) -> Self::Output;
}

/// Marker for the local zeta estimator.
#[derive(Debug, Clone, Copy)]
pub struct Zeta;

impl<T: FloatLinalg + Debug + Send + Sync> LlcfAdapter<T> for Zeta {
    type Output = ZetaLlcfBuilder<T>;

    fn convert(builder: LlcfBuilder<T>) -> Self::Output {
        let mut result = ZetaLlcfBuilder::default();

        if let Some(k) = builder.k {
            result.k = k;
        }
        if let Some(sm) = builder.scaling {
            result.scaling = sm;
        }
        if let Some(dm) = builder.distance_metric {
            result.distance_metric = dm;
        }
        if let Some(tol) = builder.tolerance {
            result.tolerance = tol;
        }
        if let Some(ns) = builder.neighbor_search {
            result.neighbor_search = ns;
        }
        if let Some(xd) = builder.x_dimensions {
            result.x_dimensions = xd;
        }
        if let Some(yd) = builder.y_dimensions {
            result.y_dimensions = yd;
        }
        if let Some(p) = builder.parallel {
            result.parallel = p;
        }

        // Bootstrap-only parameters
        let unsupported = [
            ("iterations", builder.iterations.is_some()),
            ("alpha", builder.alpha.is_some()),
            ("gamma", builder.gamma.is_some()),
            ("seed", builder.seed.is_some()),
        ];
        if let Some(&(feature, _)) = unsupported.iter().find(|(_, set)| *set) {
            result.deferred_error = Some(LlcfError::UnsupportedFeature {
                adapter: "Zeta",
                feature,
            });
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for the bootstrap hypothesis test.
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap;

impl<T: FloatLinalg + Debug + Send + Sync> LlcfAdapter<T> for Bootstrap {
    type Output = BootstrapLlcfBuilder<T>;

    fn convert(builder: LlcfBuilder<T>) -> Self::Output {
        let mut result = BootstrapLlcfBuilder::default();

        if let Some(k) = builder.k {
            result.k = k;
        }
        if let Some(sm) = builder.scaling {
            result.scaling = sm;
        }
        if let Some(dm) = builder.distance_metric {
            result.distance_metric = dm;
        }
        if let Some(tol) = builder.tolerance {
            result.tolerance = tol;
        }
        if let Some(ns) = builder.neighbor_search {
            result.neighbor_search = ns;
        }
        if let Some(xd) = builder.x_dimensions {
            result.x_dimensions = xd;
        }
        if let Some(yd) = builder.y_dimensions {
            result.y_dimensions = yd;
        }
        if let Some(iterations) = builder.iterations {
            result.iterations = iterations;
        }
        if let Some(alpha) = builder.alpha {
            result.alpha = alpha;
        }
        if let Some(gamma) = builder.gamma {
            result.gamma = gamma;
        }
        result.seed = builder.seed;
        if let Some(p) = builder.parallel {
            result.parallel = p;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
