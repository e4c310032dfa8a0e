//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions and structures for decoding SPU
//! instruction fields from 32-bit instruction encodings. Bit positions in
//! the documentation use the ISA's MSB-first numbering (bit 0 is the most
//! significant bit of the word).

use std::fmt;

use crate::common::constants::{
    I7_SHIFT, I10_SHIFT, I16_SHIFT, I18_SHIFT, RA_SHIFT, RB_SHIFT, REG_MASK, RRR_RT_SHIFT,
    RT_SHIFT,
};
use crate::core::units::{Lane, UnitId};
use crate::isa::opcodes::Opcode;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Every accessor is a pure shift-and-mask; which accessor is meaningful
/// depends on the format class chosen by the classifier.
pub trait InstructionBits {
    /// Extracts an opcode field of `width` bits starting at bit 0.
    fn opcode_field(&self, width: u32) -> u32;

    /// Extracts the RT field (bits 25-31).
    fn rt(&self) -> u8;

    /// Extracts the RA field (bits 18-24).
    fn ra(&self) -> u8;

    /// Extracts the RB field (bits 11-17).
    fn rb(&self) -> u8;

    /// Extracts the RC field of the RRR format (bits 25-31).
    fn rc(&self) -> u8;

    /// Extracts the RT field of the RRR format (bits 4-10).
    fn rrr_rt(&self) -> u8;

    /// Extracts the sign-extended 7-bit immediate (bits 11-17).
    fn i7(&self) -> i32;

    /// Extracts the sign-extended 10-bit immediate (bits 8-17).
    fn i10(&self) -> i32;

    /// Extracts the sign-extended 16-bit immediate (bits 9-24).
    fn i16(&self) -> i32;

    /// Extracts the zero-extended 18-bit immediate (bits 7-24).
    fn i18(&self) -> i32;
}

/// Sign-extends the low `bits` bits of `value`.
#[inline(always)]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode_field(&self, width: u32) -> u32 {
        self >> (32 - width)
    }

    #[inline(always)]
    fn rt(&self) -> u8 {
        ((self >> RT_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn ra(&self) -> u8 {
        ((self >> RA_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rb(&self) -> u8 {
        ((self >> RB_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rc(&self) -> u8 {
        (self & REG_MASK) as u8
    }

    #[inline(always)]
    fn rrr_rt(&self) -> u8 {
        ((self >> RRR_RT_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn i7(&self) -> i32 {
        sign_extend((self >> I7_SHIFT) & 0x7F, 7)
    }

    #[inline(always)]
    fn i10(&self) -> i32 {
        sign_extend((self >> I10_SHIFT) & 0x3FF, 10)
    }

    #[inline(always)]
    fn i16(&self) -> i32 {
        sign_extend((self >> I16_SHIFT) & 0xFFFF, 16)
    }

    #[inline(always)]
    fn i18(&self) -> i32 {
        ((self >> I18_SHIFT) & 0x3FFFF) as i32
    }
}

/// Instruction format class; selects the field layout of the word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register: `op(11) rb ra rt`.
    #[default]
    Rr,
    /// Register-register-register: `op(4) rt rb ra rc`.
    Rrr,
    /// 7-bit immediate: `op(11) i7 ra rt`.
    Ri7,
    /// 10-bit immediate: `op(8) i10 ra rt`.
    Ri10,
    /// 16-bit immediate: `op(9) i16 rt`.
    Ri16,
    /// 18-bit immediate: `op(7) i18 rt`.
    Ri18,
    /// Local-store displacement: RI10 layout, immediate counts quadwords.
    LsImm,
}

impl Format {
    /// Width of the opcode field for this format.
    pub const fn opcode_width(self) -> u32 {
        match self {
            Self::Rr | Self::Ri7 => 11,
            Self::Ri16 => 9,
            Self::Ri10 | Self::LsImm => 8,
            Self::Ri18 => 7,
            Self::Rrr => 4,
        }
    }

    /// Opcode widths in the order the classifier tries them (widest first).
    pub const SEARCH_WIDTHS: [u32; 5] = [11, 9, 8, 7, 4];
}

/// One source operand slot of a decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Operand {
    /// 7-bit register address.
    pub addr: u8,
    /// Whether the instruction actually reads this register.
    pub valid: bool,
}

impl Operand {
    /// A register read of `addr`.
    pub const fn reg(addr: u8) -> Self {
        Self { addr, valid: true }
    }

    /// An unused operand slot.
    pub const NONE: Self = Self {
        addr: 0,
        valid: false,
    };
}

/// Decoded instruction descriptor, produced once per lane per cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Opcode,
    /// Format class the word was decoded with.
    pub format: Format,
    /// Execution unit the instruction dispatches to (`None` for no-ops).
    pub unit: Option<UnitId>,
    /// Issue lane the instruction must occupy (`None` for lane-less no-ops).
    pub lane: Option<Lane>,
    /// Destination register address.
    pub dest: u8,
    /// Whether the instruction writes `dest`.
    pub write: bool,
    /// Operand slot A (usually RA).
    pub a: Operand,
    /// Operand slot B (usually RB).
    pub b: Operand,
    /// Operand slot C (RC, or RT when RT is read).
    pub c: Operand,
    /// Decoded immediate (sign- or zero-extended per format).
    pub imm: i32,
}

impl Decoded {
    /// The no-op descriptor for `raw`: no unit, no lane, no destination write.
    pub const fn noop(raw: u32) -> Self {
        Self {
            raw,
            op: if raw == 0 {
                Opcode::Null
            } else {
                Opcode::Unknown
            },
            format: Format::Rr,
            unit: None,
            lane: None,
            dest: 0,
            write: false,
            a: Operand::NONE,
            b: Operand::NONE,
            c: Operand::NONE,
            imm: 0,
        }
    }

    /// Returns the three operand slots in order.
    pub const fn sources(&self) -> [Operand; 3] {
        [self.a, self.b, self.c]
    }

    /// Whether this descriptor does nothing at all.
    pub const fn is_noop(&self) -> bool {
        self.unit.is_none() && !self.write
    }

    /// Whether this descriptor is a branch-unit instruction.
    pub fn is_branch(&self) -> bool {
        self.unit == Some(UnitId::Branch)
    }

    /// Returns the destination register if the instruction writes one.
    pub const fn writes(&self) -> Option<u8> {
        if self.write { Some(self.dest) } else { None }
    }

    /// Whether any valid source operand reads `addr`.
    pub fn reads(&self, addr: u8) -> bool {
        self.sources().iter().any(|s| s.valid && s.addr == addr)
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::isa::disasm::disassemble(self))
    }
}
