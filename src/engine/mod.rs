//! Layer 5: Engine
//!
//! # Purpose
//!
//! Orchestration of complete runs:
//! - Parameter and data validation
//! - Estimator and bootstrap execution
//! - Result types
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Estimator and bootstrap execution.
pub mod executor;

/// Result types.
pub mod output;

/// Input and parameter validation.
pub mod validator;
