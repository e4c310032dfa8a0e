//! Architectural state.
//!
//! The only architectural state the control plane owns is the SIMD
//! register file and its per-cycle commit ports.

/// 128 x 128-bit register file with same-cycle commit bypass.
pub mod regfile;

pub use regfile::{CommitPorts, RegWrite, RegisterFile};
