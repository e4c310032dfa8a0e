//! Global Core Constants.
//!
//! This module defines constants shared across the core model. It includes:
//! 1. **Register Constants:** Register count and register-field width.
//! 2. **Instruction Constants:** Opcode field widths and operand field shifts.
//! 3. **Pipeline Constants:** Forward-queue depth and issue width.

/// Number of architectural SIMD registers.
pub const REGISTER_COUNT: usize = 128;

/// Mask for a 7-bit register address field.
pub const REG_MASK: u32 = 0x7F;

/// Number of instructions fetched and considered for issue per cycle.
pub const ISSUE_WIDTH: usize = 2;

/// Depth of each per-lane forward queue.
///
/// Every instruction commits to the register file this many cycles after
/// it issues, whatever unit executed it.
pub const FORWARD_DEPTH: usize = 7;

/// Index of the youngest forward-queue slot.
pub const FORWARD_TAIL: usize = FORWARD_DEPTH - 1;

/// Shift for the RT field (bits 25-31, MSB-first numbering).
pub const RT_SHIFT: u32 = 0;

/// Shift for the RA field (bits 18-24).
pub const RA_SHIFT: u32 = 7;

/// Shift for the RB field (bits 11-17).
pub const RB_SHIFT: u32 = 14;

/// Shift for the RRR-format destination field (bits 4-10).
pub const RRR_RT_SHIFT: u32 = 21;

/// Shift for the immediate fields of RI7, RI10, RI16 and RI18 formats.
pub const I7_SHIFT: u32 = 14;
/// Shift for the 10-bit immediate (bits 8-17).
pub const I10_SHIFT: u32 = 14;
/// Shift for the 16-bit immediate (bits 9-24).
pub const I16_SHIFT: u32 = 7;
/// Shift for the 18-bit immediate (bits 7-24).
pub const I18_SHIFT: u32 = 7;

/// Bytes per quadword (one SIMD register, one local-store line).
pub const QUADWORD_BYTES: usize = 16;

/// Default local-store size in bytes (32 KiB).
pub const DEFAULT_LOCAL_STORE_BYTES: usize = 32 * 1024;

/// Default instruction-store capacity in instruction words.
pub const DEFAULT_INSTRUCTION_WORDS: usize = 2048;

/// The all-zero instruction word: the distinguished no-op.
pub const NOP_WORD: u32 = 0;
