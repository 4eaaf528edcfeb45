//! Error types for the LLCF test.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate. Errors cover malformed input data, invalid
//! configuration parameters, and builder misuse.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Every variant describes a global precondition failure.
//!   Per-point geometric degeneracy is never an error; it is reported as an
//!   undefined (NaN) zeta entry instead.
//! * **Comparable**: Errors implement `Clone` and `PartialEq` so tests can
//!   assert on exact variants.
//!
//! ## Non-goals
//!
//! * This module does not attempt recovery or automatic correction.

// External dependencies
use thiserror::Error;

/// Errors raised by the LLCF zeta estimator and bootstrap test.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlcfError {
    /// One of the input matrices has no rows.
    #[error("Input arrays are empty")]
    EmptyInput,

    /// Generic invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A flat sample slice cannot be split into rows of the given width.
    #[error("Invalid dimensions for {which}: {dimensions} columns do not divide {len} values")]
    InvalidDimensions {
        /// Which sample the check failed on (`"x"` or `"y"`).
        which: &'static str,
        /// Configured column count.
        dimensions: usize,
        /// Length of the flat slice.
        len: usize,
    },

    /// X and Y do not hold the same number of paired observations.
    #[error("Row mismatch: x has {x_rows} rows, y has {y_rows}")]
    MismatchedRows {
        /// Rows in X.
        x_rows: usize,
        /// Rows in Y.
        y_rows: usize,
    },

    /// A NaN or infinite value was found in the input.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// The neighborhood size does not fit the sample.
    #[error("Invalid neighborhood size: k={k} (must be in [1, {n}])")]
    InvalidNeighborhoodSize {
        /// Requested neighborhood size.
        k: usize,
        /// Number of rows available.
        n: usize,
    },

    /// Significance level outside `(0, 1)`.
    #[error("Invalid alpha: {0} (must be > 0 and < 1)")]
    InvalidAlpha(f64),

    /// Trimming fraction outside `[0, 1)`.
    #[error("Invalid gamma: {0} (must be >= 0 and < 1)")]
    InvalidGamma(f64),

    /// Zero bootstrap iterations.
    #[error("Invalid iterations: {0} (must be at least 1)")]
    InvalidIterations(usize),

    /// Hull containment tolerance negative or non-finite.
    #[error("Invalid tolerance: {0} (must be >= 0 and finite)")]
    InvalidTolerance(f64),

    /// Minkowski exponent below one or non-finite.
    #[error("Invalid Minkowski power: {0} (must be >= 1 and finite)")]
    InvalidMinkowskiPower(f64),

    /// Scaling selector string that names no known method.
    #[error("Unknown scaling method '{0}' (expected 'minmax', 'rank' or 'none')")]
    UnknownScaling(String),

    /// A parameter was configured that the selected adapter does not use.
    #[error("Adapter '{adapter}' does not support feature: {feature}")]
    UnsupportedFeature {
        /// Adapter name.
        adapter: &'static str,
        /// Parameter name.
        feature: &'static str,
    },

    /// A builder setter was called more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Parameter name.
        parameter: &'static str,
    },
}
