//! Result types returned by the adapters.
//!
//! ## Purpose
//!
//! [`ZetaResult`] carries the local zeta vectors of one estimator run and
//! [`LlcfResult`] the full bootstrap test outcome. Both print a short summary
//! through `Display` and serialize under the `serde` feature.
//!
//! ## Invariants
//!
//! * Zeta vectors have one entry per input row; NaN marks an undefined entry.

// External dependencies
use core::fmt::{self, Display, Formatter};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::resampling::fraction_equal_one;
use crate::evaluation::histogram::ZetaHistogram;
use crate::evaluation::intervals::ConfidenceInterval;
use crate::math::scaling::ScalingMethod;

// ============================================================================
// Zeta Result
// ============================================================================

/// Output of the local zeta estimator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZetaResult<T> {
    /// Local zeta of every row in X space.
    pub zeta_x: Vec<T>,

    /// Local zeta of every row in Y space.
    pub zeta_y: Vec<T>,

    /// Neighborhood size used.
    pub k: usize,

    /// Number of rows.
    pub n: usize,

    /// Columns of X.
    pub x_dimensions: usize,

    /// Columns of Y.
    pub y_dimensions: usize,

    /// Rescaling applied before neighbor search.
    pub scaling: ScalingMethod,
}

impl<T: Float> ZetaResult<T> {
    /// Histogram of the X-space zetas.
    pub fn histogram_x(&self, bins: usize) -> ZetaHistogram<T> {
        ZetaHistogram::from_values(&self.zeta_x, bins)
    }

    /// Histogram of the Y-space zetas.
    pub fn histogram_y(&self, bins: usize) -> ZetaHistogram<T> {
        ZetaHistogram::from_values(&self.zeta_y, bins)
    }

    /// Fraction of X-space zetas exactly equal to one.
    pub fn probability_x(&self) -> T {
        fraction_equal_one(&self.zeta_x)
    }

    /// Fraction of Y-space zetas exactly equal to one.
    pub fn probability_y(&self) -> T {
        fraction_equal_one(&self.zeta_y)
    }

    /// Number of undefined X-space zetas.
    pub fn undefined_x(&self) -> usize {
        self.zeta_x.iter().filter(|z| z.is_nan()).count()
    }

    /// Number of undefined Y-space zetas.
    pub fn undefined_y(&self) -> usize {
        self.zeta_y.iter().filter(|z| z.is_nan()).count()
    }
}

impl<T: Float + Display> Display for ZetaResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.n)?;
        writeln!(f, "  Dimensions: x={}, y={}", self.x_dimensions, self.y_dimensions)?;
        writeln!(f, "  Neighbors (k): {}", self.k)?;
        writeln!(f, "  Scaling: {:?}", self.scaling)?;
        writeln!(f)?;
        writeln!(f, "{:>10} {:>14} {:>10}", "Direction", "P(zeta = 1)", "Undefined")?;
        writeln!(f, "{:-<36}", "")?;
        writeln!(
            f,
            "{:>10} {:>14.4} {:>10}",
            "X",
            self.probability_x(),
            self.undefined_x()
        )?;
        write!(
            f,
            "{:>10} {:>14.4} {:>10}",
            "Y",
            self.probability_y(),
            self.undefined_y()
        )
    }
}

// ============================================================================
// Bootstrap Test Result
// ============================================================================

/// Output of the bootstrap LLCF test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LlcfResult<T> {
    /// Full-sample local zetas in X space.
    pub zeta_x: Vec<T>,

    /// Full-sample local zetas in Y space.
    pub zeta_y: Vec<T>,

    /// Full-sample neighborhood size.
    pub k: usize,

    /// Number of rows.
    pub n: usize,

    /// Bootstrap iterations run.
    pub iterations: usize,

    /// Significance level.
    pub alpha: T,

    /// Two-sided trimming fraction.
    pub gamma: T,

    /// Observed fraction of X-space zetas equal to one.
    pub probability_x: T,

    /// Observed fraction of Y-space zetas equal to one.
    pub probability_y: T,

    /// Confidence interval for a function from X to Y.
    pub interval_x: ConfidenceInterval<T>,

    /// Confidence interval for a function from Y to X.
    pub interval_y: ConfidenceInterval<T>,

    /// Bootstrap deviations for X, in iteration order.
    pub deviations_x: Vec<T>,

    /// Bootstrap deviations for Y, in iteration order.
    pub deviations_y: Vec<T>,
}

impl<T: Float> LlcfResult<T> {
    /// Interval bounds as `((lower_x, upper_x), (lower_y, upper_y))`.
    pub fn intervals(&self) -> ((T, T), (T, T)) {
        (self.interval_x.bounds(), self.interval_y.bounds())
    }

    /// Whether a locally Lipschitz function from X to Y is accepted.
    pub fn accepts_x_to_y(&self) -> bool {
        self.interval_x.accepts_invertibility()
    }

    /// Whether a locally Lipschitz function from Y to X is accepted.
    pub fn accepts_y_to_x(&self) -> bool {
        self.interval_y.accepts_invertibility()
    }

    /// Histogram of the full-sample X-space zetas.
    pub fn histogram_x(&self, bins: usize) -> ZetaHistogram<T> {
        ZetaHistogram::from_values(&self.zeta_x, bins)
    }

    /// Histogram of the full-sample Y-space zetas.
    pub fn histogram_y(&self, bins: usize) -> ZetaHistogram<T> {
        ZetaHistogram::from_values(&self.zeta_y, bins)
    }
}

impl<T: Float + Display> Display for LlcfResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let verdict = |accepted: bool| if accepted { "accept" } else { "reject" };

        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.n)?;
        writeln!(f, "  Neighbors (k): {}", self.k)?;
        writeln!(f, "  Bootstrap iterations: {}", self.iterations)?;
        writeln!(f, "  Alpha: {}", self.alpha)?;
        writeln!(f, "  Gamma: {}", self.gamma)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>10} {:>14} {:>22} {:>8}",
            "Direction", "P(zeta = 1)", "Interval", "H0"
        )?;
        writeln!(f, "{:-<57}", "")?;
        writeln!(
            f,
            "{:>10} {:>14.4} {:>22} {:>8}",
            "X -> Y",
            self.probability_x,
            self.interval_x.to_string(),
            verdict(self.accepts_x_to_y())
        )?;
        write!(
            f,
            "{:>10} {:>14.4} {:>22} {:>8}",
            "Y -> X",
            self.probability_y,
            self.interval_y.to_string(),
            verdict(self.accepts_y_to_x())
        )
    }
}
