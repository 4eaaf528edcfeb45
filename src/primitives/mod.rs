//! Layer 1: Primitives
//!
//! # Purpose
//!
//! Fundamental data structures shared by every other layer: the crate error
//! type, row-major layout helpers, and reusable search buffers.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error type.
pub mod errors;

/// Reusable neighbor-search buffers.
pub mod buffer;

/// Row-major reshaping helpers.
pub mod layout;
