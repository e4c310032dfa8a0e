//! Permute unit.
//!
//! Latency 3, odd lane. Whole-quadword byte and bit shifts and rotates,
//! gathers of per-element low bits, and the byte shuffle.

use crate::common::Quadword;
use crate::core::units::lsu::LocalStore;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// The permute unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermuteUnit;

fn shift_bytes(a: Quadword, count: u32) -> Quadword {
    let n = count & 0x1F;
    if n > 15 {
        Quadword::ZERO
    } else {
        Quadword(a.0 << (8 * n))
    }
}

fn gather(bits: impl Iterator<Item = bool>) -> Quadword {
    let word = bits.fold(0u32, |acc, bit| (acc << 1) | u32::from(bit));
    Quadword::from_words([word, 0, 0, 0])
}

fn shuffle(a: Quadword, b: Quadword, pattern: Quadword) -> Quadword {
    let mut source = [0u8; 32];
    source[..16].copy_from_slice(&a.bytes());
    source[16..].copy_from_slice(&b.bytes());
    Quadword::from_bytes(pattern.bytes().map(|sel| {
        if sel & 0xC0 == 0x80 {
            0x00
        } else if sel & 0xE0 == 0xC0 {
            0xFF
        } else if sel & 0xE0 == 0xE0 {
            0x80
        } else {
            source[usize::from(sel & 0x1F)]
        }
    }))
}

impl PermuteUnit {
    /// Computes a permute-unit result.
    pub fn compute(req: &UnitRequest) -> Quadword {
        let a = req.a;
        let count = req.b.preferred();
        let imm = req.imm as u32;
        match req.op {
            Opcode::Shlqby => shift_bytes(a, count),
            Opcode::Shlqbyi => shift_bytes(a, imm),
            Opcode::Rotqby => Quadword(a.0.rotate_left(8 * (count & 0xF))),
            Opcode::Rotqbyi => Quadword(a.0.rotate_left(8 * (imm & 0xF))),
            Opcode::Shlqbi => Quadword(a.0 << (count & 7)),
            Opcode::Shlqbii => Quadword(a.0 << (imm & 7)),
            Opcode::Rotqbi => Quadword(a.0.rotate_left(count & 7)),
            Opcode::Rotqbii => Quadword(a.0.rotate_left(imm & 7)),
            Opcode::Gb => gather(a.words().into_iter().map(|w| w & 1 != 0)),
            Opcode::Gbh => gather(a.halfwords().into_iter().map(|h| h & 1 != 0)),
            Opcode::Gbb => gather(a.bytes().into_iter().map(|x| x & 1 != 0)),
            Opcode::Shufb => shuffle(a, req.b, req.c),
            _ => Quadword::ZERO,
        }
    }
}

impl ExecutionUnit for PermuteUnit {
    fn id(&self) -> UnitId {
        UnitId::Permute
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        Self::compute(req)
    }
}
