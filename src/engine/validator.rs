//! Input validation for LLCF configuration and data.
//!
//! ## Purpose
//!
//! This module checks every global precondition of the estimator and the
//! bootstrap test before any computation starts: sample shapes, finite values,
//! neighborhood size, and parameter ranges.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Shape Checks**: Flat slices must split into whole rows, and X and Y
//!   must hold the same number of rows.
//! * **Finite Checks**: Ensures all inputs are finite (no NaN/Inf).
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not rescale or filter input data.
//! * This module does not report per-point geometric degeneracy (that is an
//!   undefined zeta value, not an error).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMetric;
use crate::primitives::errors::LlcfError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for LLCF configuration and input data.
///
/// Provides static methods for validating parameters and input data. All
/// methods fail fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a paired sample and return its row count.
    pub fn validate_inputs<T: Float>(
        x: &[T],
        x_dimensions: usize,
        y: &[T],
        y_dimensions: usize,
    ) -> Result<usize, LlcfError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(LlcfError::EmptyInput);
        }

        // Check 2: Whole rows
        Self::validate_dimensions("x", x_dimensions, x.len())?;
        Self::validate_dimensions("y", y_dimensions, y.len())?;

        // Check 3: Paired rows
        let x_rows = x.len() / x_dimensions;
        let y_rows = y.len() / y_dimensions;
        if x_rows != y_rows {
            return Err(LlcfError::MismatchedRows { x_rows, y_rows });
        }

        // Check 4: All values finite
        Self::validate_finite(x, "x")?;
        Self::validate_finite(y, "y")?;

        Ok(x_rows)
    }

    /// Validate that a flat slice splits into rows of `dimensions` columns.
    pub fn validate_dimensions(
        which: &'static str,
        dimensions: usize,
        len: usize,
    ) -> Result<(), LlcfError> {
        if dimensions == 0 || len % dimensions != 0 {
            return Err(LlcfError::InvalidDimensions {
                which,
                dimensions,
                len,
            });
        }
        Ok(())
    }

    fn validate_finite<T: Float>(values: &[T], name: &str) -> Result<(), LlcfError> {
        for (i, &val) in values.iter().enumerate() {
            if !val.is_finite() {
                return Err(LlcfError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the neighborhood size against the row count.
    pub fn validate_neighborhood_size(k: usize, n: usize) -> Result<(), LlcfError> {
        if k == 0 || k > n {
            return Err(LlcfError::InvalidNeighborhoodSize { k, n });
        }
        Ok(())
    }

    /// Validate the significance level (must be in (0, 1)).
    pub fn validate_alpha<T: Float>(alpha: T) -> Result<(), LlcfError> {
        if !alpha.is_finite() || alpha <= T::zero() || alpha >= T::one() {
            return Err(LlcfError::InvalidAlpha(alpha.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the trimming fraction (must be in [0, 1)).
    pub fn validate_gamma<T: Float>(gamma: T) -> Result<(), LlcfError> {
        if !gamma.is_finite() || gamma < T::zero() || gamma >= T::one() {
            return Err(LlcfError::InvalidGamma(gamma.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the number of bootstrap iterations; any positive count is accepted.
    pub fn validate_iterations(iterations: usize) -> Result<(), LlcfError> {
        if iterations == 0 {
            return Err(LlcfError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the hull containment tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), LlcfError> {
        if !tol.is_finite() || tol < T::zero() {
            return Err(LlcfError::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the distance metric parameters.
    pub fn validate_distance_metric<T: Float>(metric: &DistanceMetric<T>) -> Result<(), LlcfError> {
        if let DistanceMetric::Minkowski(p) = *metric {
            if !p.is_finite() || p < T::one() {
                return Err(LlcfError::InvalidMinkowskiPower(
                    p.to_f64().unwrap_or(f64::NAN),
                ));
            }
        }
        Ok(())
    }

    /// Validate that no parameter was set multiple times.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), LlcfError> {
        if let Some(param) = duplicate_param {
            return Err(LlcfError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
