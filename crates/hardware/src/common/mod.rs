//! Common utilities and types used throughout the core model.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Register, instruction-field and pipeline constants.
//! 2. **Error Handling:** Host-side error type for configuration and program loading.
//! 3. **Quadword:** The 128-bit SIMD value held by registers and queues.

/// Common constants used throughout the simulator.
pub mod constants;

/// Host-side error types.
pub mod error;

/// 128-bit SIMD register value.
pub mod quadword;

pub use constants::{FORWARD_DEPTH, REGISTER_COUNT};
pub use error::{SimError, SimResult};
pub use quadword::Quadword;
