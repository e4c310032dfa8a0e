//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode catalogue, the lane classifier and the text tooling
//! built on them.
//!
//! # Components
//!
//! * `instruction`: Field extraction, format classes and the decoded descriptor.
//! * `opcodes`: The even- and odd-lane opcode tables.
//! * `decode`: Longest-prefix classification of raw words.
//! * `asm`: Line-oriented assembler.
//! * `disasm`: Rendering of decoded instructions as assembly.

/// Line-oriented assembler.
pub mod asm;

/// Instruction classification against the lane opcode tables.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Opcode catalogue shared by the decoder, assembler and disassembler.
pub mod opcodes;

pub use decode::{classify, decode};
pub use instruction::{Decoded, Format, InstructionBits, Operand};
pub use opcodes::Opcode;
