//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! Core estimator logic built on the math layer:
//! - Local zeta computation (interval and convex hull branches)
//! - Bootstrap replicate draws and multiplicity expansion
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
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Bootstrap replicates.
pub mod resampling;

/// Local zeta estimators.
pub mod zeta;
