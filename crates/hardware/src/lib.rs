//! Dual-issue SPU core simulator library.
//!
//! This crate implements a cycle-level model of the control plane of a
//! dual-issue SPU-class SIMD core with the following:
//! 1. **Core:** Pair fetch, decode, dual-issue hazard scoring, stall/replay,
//!    branch resolution with sibling squash, and the 128 x 128-bit register file.
//! 2. **Forwarding:** Same-cycle commit bypass (Tier A) and the per-lane 7-deep
//!    forward queues (Tier B).
//! 3. **Units:** Seven fixed-latency execution units on two issue lanes.
//! 4. **ISA:** Opcode catalogue, classifier, disassembler and a small assembler.
//! 5. **Simulation:** Configuration, program images, the `Simulator` façade and statistics.
//!
//! ```
//! use spusim_core::{Config, Simulator};
//!
//! let mut sim = Simulator::new(&Config::default());
//! sim.load_assembly("il $1, 5\nil $2, 7\na $3, $1, $2").unwrap();
//! assert!(sim.run_until_drained());
//! assert_eq!(sim.register(3).preferred(), 12);
//! ```

/// Common types and constants (quadword, errors, field layout).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// SPU core (pipeline, units, register file, tick).
pub mod core;
/// Instruction set (opcodes, decode, disassembly, assembler).
pub mod isa;
/// Program images and the simulator façade.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Core model; holds pipeline, units, register file and stats.
pub use crate::core::Spu;
/// Top-level façade; construct with `Simulator::new`.
pub use crate::sim::Simulator;
