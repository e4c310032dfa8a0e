//! Core processor implementation.
//!
//! This module contains the SPU core model: the control-plane pipeline, the
//! execution units behind the two issue lanes, the architectural register
//! file, and the `Spu` orchestrator that clocks them together.

/// Architectural state (the SIMD register file).
pub mod arch;

/// SPU core state and the per-cycle tick.
pub mod cpu;

/// Control-plane pipeline (fetch, scoring, delay lines, forwarding).
pub mod pipeline;

/// Execution units (fixed-point, byte, single-precision, permute, local store, branch).
pub mod units;

pub use self::cpu::Spu;
