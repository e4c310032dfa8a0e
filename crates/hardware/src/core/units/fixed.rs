//! Fixed-point execution units.
//!
//! Two units share the even lane's fixed-point work:
//! - [`FixedSimple`] (fixed-1, latency 1): add/subtract, logic, compares,
//!   immediate loads, sign extension, count-leading-zeros and select.
//! - [`FixedShift`] (fixed-2, latency 3): word and halfword shifts and rotates.
//!
//! Rotate-and-mask forms (`rotm`, `rotma`) take the two's complement of the
//! count, so a positive count in the register shifts right.

use crate::common::Quadword;
use crate::core::units::lsu::LocalStore;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// Word mask for a true comparison.
const TRUE_WORD: u32 = u32::MAX;

fn mask32(cond: bool) -> u32 {
    if cond { TRUE_WORD } else { 0 }
}

fn mask16(cond: bool) -> u16 {
    if cond { u16::MAX } else { 0 }
}

fn mask8(cond: bool) -> u8 {
    if cond { u8::MAX } else { 0 }
}

/// Fixed-1: single-cycle fixed-point operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSimple;

impl FixedSimple {
    /// Computes a fixed-1 result.
    pub fn compute(req: &UnitRequest) -> Quadword {
        let (a, b, c) = (req.a, req.b, req.c);
        let imm = req.imm as u32;
        let imm16 = imm as u16;
        match req.op {
            Opcode::A => a.zip_words(b, u32::wrapping_add),
            Opcode::Ah => a.zip_halfwords(b, u16::wrapping_add),
            Opcode::Sf => a.zip_words(b, |x, y| y.wrapping_sub(x)),
            Opcode::Sfh => a.zip_halfwords(b, |x, y| y.wrapping_sub(x)),
            Opcode::And => Quadword(a.0 & b.0),
            Opcode::Or => Quadword(a.0 | b.0),
            Opcode::Xor => Quadword(a.0 ^ b.0),
            Opcode::Nand => Quadword(!(a.0 & b.0)),
            Opcode::Nor => Quadword(!(a.0 | b.0)),
            Opcode::Andc => Quadword(a.0 & !b.0),
            Opcode::Orc => Quadword(a.0 | !b.0),
            Opcode::Eqv => Quadword(!(a.0 ^ b.0)),
            Opcode::Ceq => a.zip_words(b, |x, y| mask32(x == y)),
            Opcode::Ceqh => a.zip_halfwords(b, |x, y| mask16(x == y)),
            Opcode::Ceqb => a.zip_bytes(b, |x, y| mask8(x == y)),
            Opcode::Cgt => a.zip_words(b, |x, y| mask32((x as i32) > (y as i32))),
            Opcode::Cgth => a.zip_halfwords(b, |x, y| mask16((x as i16) > (y as i16))),
            Opcode::Cgtb => a.zip_bytes(b, |x, y| mask8((x as i8) > (y as i8))),
            Opcode::Clgt => a.zip_words(b, |x, y| mask32(x > y)),
            Opcode::Clgth => a.zip_halfwords(b, |x, y| mask16(x > y)),
            Opcode::Clgtb => a.zip_bytes(b, |x, y| mask8(x > y)),
            Opcode::Clz => a.map_words(u32::leading_zeros),
            Opcode::Xsbh => Quadword::from_halfwords(a.halfwords().map(|h| h as u8 as i8 as i16 as u16)),
            Opcode::Xshw => a.map_words(|w| w as u16 as i16 as i32 as u32),
            Opcode::Xswd => {
                let w = a.words();
                let lo = w[1] as i32;
                let hi = w[3] as i32;
                Quadword::from_words([(lo >> 31) as u32, w[1], (hi >> 31) as u32, w[3]])
            }
            Opcode::Ai => a.map_words(|x| x.wrapping_add(imm)),
            Opcode::Ahi => Quadword::from_halfwords(a.halfwords().map(|x| x.wrapping_add(imm16))),
            Opcode::Sfi => a.map_words(|x| imm.wrapping_sub(x)),
            Opcode::Sfhi => Quadword::from_halfwords(a.halfwords().map(|x| imm16.wrapping_sub(x))),
            Opcode::Andi => a.map_words(|x| x & imm),
            Opcode::Ori => a.map_words(|x| x | imm),
            Opcode::Xori => a.map_words(|x| x ^ imm),
            Opcode::Ceqi => a.map_words(|x| mask32(x == imm)),
            Opcode::Cgti => a.map_words(|x| mask32((x as i32) > req.imm)),
            Opcode::Clgti => a.map_words(|x| mask32(x > imm)),
            Opcode::Il => Quadword::splat_word(imm),
            Opcode::Ilh => Quadword::splat_halfword(imm16),
            Opcode::Ilhu => Quadword::splat_word(u32::from(imm16) << 16),
            Opcode::Iohl => c.map_words(|x| x | u32::from(imm16)),
            Opcode::Ila => Quadword::splat_word(imm & 0x3_FFFF),
            Opcode::Fsmbi => Quadword::from_bytes(std::array::from_fn(|i| {
                mask8(imm16 & (0x8000 >> i) != 0)
            })),
            Opcode::Selb => Quadword((a.0 & !c.0) | (b.0 & c.0)),
            _ => Quadword::ZERO,
        }
    }
}

impl ExecutionUnit for FixedSimple {
    fn id(&self) -> UnitId {
        UnitId::Fixed1
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        Self::compute(req)
    }
}

/// Fixed-2: shift and rotate operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedShift;

fn shl_word(x: u32, count: u32) -> u32 {
    let n = count & 0x3F;
    if n > 31 { 0 } else { x << n }
}

fn shl_half(x: u16, count: u32) -> u16 {
    let n = count & 0x1F;
    if n > 15 { 0 } else { x << n }
}

fn rotm_word(x: u32, count: u32) -> u32 {
    let n = count.wrapping_neg() & 0x3F;
    if n > 31 { 0 } else { x >> n }
}

fn rotma_word(x: u32, count: u32) -> u32 {
    let n = (count.wrapping_neg() & 0x3F).min(31);
    ((x as i32) >> n) as u32
}

impl FixedShift {
    /// Computes a fixed-2 result.
    pub fn compute(req: &UnitRequest) -> Quadword {
        let (a, b) = (req.a, req.b);
        let imm = req.imm as u32;
        match req.op {
            Opcode::Shl => a.zip_words(b, shl_word),
            Opcode::Shlh => a.zip_halfwords(b, |x, y| shl_half(x, u32::from(y))),
            Opcode::Rot => a.zip_words(b, |x, y| x.rotate_left(y & 0x1F)),
            Opcode::Roth => a.zip_halfwords(b, |x, y| x.rotate_left(u32::from(y) & 0xF)),
            Opcode::Rotm => a.zip_words(b, rotm_word),
            Opcode::Rotma => a.zip_words(b, rotma_word),
            Opcode::Shli => a.map_words(|x| shl_word(x, imm)),
            Opcode::Shlhi => Quadword::from_halfwords(a.halfwords().map(|x| shl_half(x, imm))),
            Opcode::Roti => a.map_words(|x| x.rotate_left(imm & 0x1F)),
            Opcode::Rothi => Quadword::from_halfwords(a.halfwords().map(|x| x.rotate_left(imm & 0xF))),
            Opcode::Rotmi => a.map_words(|x| rotm_word(x, imm)),
            Opcode::Rotmai => a.map_words(|x| rotma_word(x, imm)),
            _ => Quadword::ZERO,
        }
    }
}

impl ExecutionUnit for FixedShift {
    fn id(&self) -> UnitId {
        UnitId::Fixed2
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        Self::compute(req)
    }
}
