//! # LLCF: Testing for Locally Lipschitz Continuous Functions in Rust
//!
//! A statistical procedure that decides, from a finite paired sample, whether a
//! locally Lipschitz continuous function is likely to map one random vector to
//! another, in either or both directions.
//!
//! ## What is the LLCF test?
//!
//! For every sample point, the test takes its `k` nearest neighbors in the
//! joint space `J = [X | Y]` and asks whether that neighbor set is also a
//! "tight" local region of each marginal space:
//!
//! 1. In the marginal space (X or Y), build the region spanned by the
//!    neighbors: the interval `[min, max]` in one dimension, the convex hull
//!    otherwise.
//! 2. Count the sample rows falling inside that region.
//! 3. The **local zeta** is `k / count`. It equals `1` exactly when the region
//!    captures the neighbors and nothing else.
//!
//! If a locally Lipschitz function maps X to Y, nearby X values have nearby Y
//! values, joint-space neighborhoods project onto compact X regions, and the
//! fraction of `zeta == 1` points in X space approaches one. A percentile
//! bootstrap turns that fraction into a confidence interval; the null
//! hypothesis (a locally Lipschitz function exists with probability
//! `1 - gamma`) is accepted at level `alpha` when the interval contains `1`.
//!
//! ## Quick Start
//!
//! ### Full test
//!
//! ```rust
//! use llcf_rs::prelude::*;
//!
//! let x: Vec<f64> = (1..=20).map(|i| i as f64).collect();
//! let y = x.clone();
//!
//! let result = Llcf::new()
//!     .k(5)
//!     .iterations(50)
//!     .seed(42)
//!     .adapter(Bootstrap)
//!     .build()?
//!     .fit(&x, &y)?;
//!
//! let ((low_x, high_x), (low_y, high_y)) = result.intervals();
//! assert!(low_x <= 1.0 && 1.0 <= high_x);
//! assert!(low_y <= 1.0 && 1.0 <= high_y);
//! assert!(result.accepts_x_to_y());
//! # Result::<(), LlcfError>::Ok(())
//! ```
//!
//! ### Estimator only
//!
//! ```rust
//! use llcf_rs::prelude::*;
//!
//! // Two columns in X, one in Y, row-major
//! let x = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.5, 0.5];
//! let y = vec![0.0, 1.0, 2.0, 3.0, 4.0];
//!
//! let zetas = Llcf::new()
//!     .x_dimensions(2)
//!     .k(3)
//!     .adapter(Zeta)
//!     .build()?
//!     .fit(&x, &y)?;
//!
//! assert_eq!(zetas.zeta_x.len(), 5);
//! assert_eq!(zetas.zeta_y.len(), 5);
//! # Result::<(), LlcfError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter           | Default              | Adapter   | Description                              |
//! |---------------------|----------------------|-----------|------------------------------------------|
//! | `k`                 | `ceil(sqrt(n))`      | both      | Joint-space neighbors per point          |
//! | `scaling`           | `MinMax`             | both      | Per-column rescaling before search       |
//! | `distance_metric`   | `Euclidean`          | both      | Joint-space metric                       |
//! | `tolerance`         | `1e-10`              | both      | Hull containment slack                   |
//! | `neighbor_search`   | `KdTree`             | both      | Spatial index                            |
//! | `x_dimensions`      | `1`                  | both      | Columns of X                             |
//! | `y_dimensions`      | `1`                  | both      | Columns of Y                             |
//! | `iterations`        | `100`                | Bootstrap | Bootstrap replicates                     |
//! | `alpha`             | `0.05`               | Bootstrap | Significance level                       |
//! | `gamma`             | `0.0`                | Bootstrap | Two-sided trimming fraction              |
//! | `seed`              | OS entropy           | Bootstrap | Seed of the bootstrap random source      |
//! | `parallel`          | `false`              | both      | Use rayon (requires `parallel` feature)  |
//!
//! Setting a bootstrap-only parameter before selecting the `Zeta` adapter is
//! reported by `build()` as [`LlcfError::UnsupportedFeature`]. Setting any
//! parameter twice is reported as [`LlcfError::DuplicateParameter`].
//!
//! ## Undefined zetas
//!
//! A neighbor set whose marginal points do not enclose a volume (for example,
//! three collinear points in a two-column space) has no convex hull. Its zeta
//! is stored as NaN; NaN entries never count as `zeta == 1`.
//!
//! ## Randomness
//!
//! The bootstrap never touches global random state. Use `.seed(..)` for
//! reproducible runs, or pass your own generator:
//!
//! ```rust
//! use llcf_rs::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let x: Vec<f64> = (0..30).map(|i| (i as f64 * 0.37).sin()).collect();
//! let y: Vec<f64> = x.iter().map(|v| v * v).collect();
//!
//! let test = Llcf::new().iterations(20).adapter(Bootstrap).build()?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = test.fit_with_rng(&x, &y, &mut rng)?;
//! assert!(result.interval_x.lower <= result.interval_x.upper);
//! # Result::<(), LlcfError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! Progress is reported through `tracing` events (`debug` per phase, `trace`
//! per bootstrap replicate). The library installs no subscriber.
//!
//! ## Cargo features
//!
//! * `parallel`: rayon-backed neighbor queries and bootstrap iterations.
//! * `serde`: `Serialize`/`Deserialize` for result and configuration types.
//! * `dev`: exposes the `internals` module for white-box testing.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, row-major layout helpers, and reusable
// neighbor search buffers.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains distance metrics, k-NN indexes, column scaling, convex hulls
// with their nalgebra backend, and quantile statistics.
mod math;

// Layer 3: Algorithms - core estimator logic.
//
// Contains the local zeta computation and bootstrap replicates.
mod algorithms;

// Layer 4: Evaluation - post-processing.
//
// Contains percentile confidence intervals and zeta histograms.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains validation, the estimator and bootstrap executor, and result
// assembly.
mod engine;

// Layer 6: Adapters - execution mode adapters.
//
// Contains the zeta-only estimator and the full bootstrap test.
mod adapters;

// High-level fluent API.
//
// Provides the `Llcf` builder for configuring and running the test.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard LLCF prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use llcf_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Adapter::{Bootstrap, Zeta},
        ConfidenceInterval,
        DistanceMetric::{Chebyshev, Euclidean, Manhattan, Minkowski},
        LlcfBuilder as Llcf, LlcfError, LlcfResult,
        NeighborSearch::{BruteForce, KdTree},
        NeighborhoodSize::{Auto, Fixed},
        ScalingMethod, ZetaHistogram, ZetaResult,
    };
}

pub use api::{
    BootstrapLlcf, BootstrapLlcfBuilder, ConfidenceInterval, DistanceMetric, LlcfAdapter,
    LlcfBuilder, LlcfConfig, LlcfError, LlcfResult, NeighborSearch, NeighborhoodSize,
    ScalingMethod, ZetaHistogram, ZetaLlcf, ZetaLlcfBuilder, ZetaResult,
};

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
