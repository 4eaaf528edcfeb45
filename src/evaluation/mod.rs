//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! Post-processing of zeta vectors and bootstrap deviations:
//! - Percentile bootstrap confidence intervals
//! - Histogram summaries of zeta vectors
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Zeta histograms.
pub mod histogram;

/// Bootstrap confidence intervals.
pub mod intervals;
