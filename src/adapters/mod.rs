//! Layer 6: Adapters
//!
//! # Purpose
//!
//! Execution builders selected through `LlcfBuilder::adapter`:
//! - `Zeta`: local zeta estimator only
//! - `Bootstrap`: full bootstrap LLCF test
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Bootstrap test adapter.
pub mod bootstrap;

/// Zeta estimator adapter.
pub mod zeta;
