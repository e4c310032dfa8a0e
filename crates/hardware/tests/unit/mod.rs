//! # Unit Components
//!
//! Tests organised by the crate module they exercise.



/// Opcode catalogue, classifier, assembler and disassembler.
pub mod isa;


/// Statistics counters and reports.
pub mod stats;
