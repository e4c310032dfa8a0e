//! # ISA Unit Tests
//!
//! This module contains unit tests for the instruction set tooling: the
//! lane classifier, the assembler and the disassembler.

/// Assembler dialect and error reporting.
pub mod asm;

/// Classifier field extraction and properties.
pub mod classify;

/// Disassembler output.
pub mod disasm;
