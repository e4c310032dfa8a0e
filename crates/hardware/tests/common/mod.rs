//! Shared test infrastructure.

/// Instruction word builders.
pub mod builder;

/// Simulator harness.
pub mod harness;
