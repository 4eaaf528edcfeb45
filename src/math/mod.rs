//! Layer 2: Math
//!
//! # Purpose
//!
//! Pure mathematical building blocks with no estimator-specific logic:
//! - Distance metrics and exact k-nearest neighbor indexes
//! - Column scaling (min-max, rank)
//! - Convex hulls in half-space form and their nalgebra backend
//! - Empirical quantiles and trimmed means
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Distance metrics.
pub mod distance;

/// Convex hull half-space representation.
pub mod hull;

/// Nalgebra linear algebra backend.
pub mod linalg;

/// KD-tree and brute-force neighbor search.
pub mod neighborhood;

/// Quantiles and trimmed means.
pub mod quantile;

/// Min-max and rank scaling.
pub mod scaling;
