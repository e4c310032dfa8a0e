//! Single-Precision Unit.
//!
//! The one even-lane unit with two result latencies:
//! 1. **Float class (5 cycles):** `fa fs fm fma fms fnms fceq fcgt`.
//! 2. **Integer class (6 cycles):** the 16x16 multiplies `mpy mpyu mpyh mpyi mpyui mpya`.
//!
//! Float arithmetic uses the host's IEEE single precision; rounding and
//! denormal behaviour are not modelled beyond that.

use crate::common::Quadword;
use crate::core::units::lsu::LocalStore;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// The single-precision unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinglePrecision;

fn lo16s(w: u32) -> i32 {
    i32::from(w as u16 as i16)
}

fn lo16u(w: u32) -> u32 {
    w & 0xFFFF
}

impl SinglePrecision {
    /// Computes a single-precision unit result.
    pub fn compute(req: &UnitRequest) -> Quadword {
        let (a, b, c) = (req.a, req.b, req.c);
        let imm = req.imm;
        let mask = |cond: bool| if cond { u32::MAX } else { 0 };
        match req.op {
            Opcode::Fa => a.zip_floats(b, |x, y| x + y),
            Opcode::Fs => a.zip_floats(b, |x, y| x - y),
            Opcode::Fm => a.zip_floats(b, |x, y| x * y),
            Opcode::Fma => {
                let prod = a.zip_floats(b, |x, y| x * y);
                prod.zip_floats(c, |p, z| p + z)
            }
            Opcode::Fms => {
                let prod = a.zip_floats(b, |x, y| x * y);
                prod.zip_floats(c, |p, z| p - z)
            }
            Opcode::Fnms => {
                let prod = a.zip_floats(b, |x, y| x * y);
                prod.zip_floats(c, |p, z| z - p)
            }
            Opcode::Fceq => {
                let (x, y) = (a.floats(), b.floats());
                Quadword::from_words(std::array::from_fn(|i| mask(x[i] == y[i])))
            }
            Opcode::Fcgt => {
                let (x, y) = (a.floats(), b.floats());
                Quadword::from_words(std::array::from_fn(|i| mask(x[i] > y[i])))
            }
            Opcode::Mpy => a.zip_words(b, |x, y| lo16s(x).wrapping_mul(lo16s(y)) as u32),
            Opcode::Mpyu => a.zip_words(b, |x, y| lo16u(x).wrapping_mul(lo16u(y))),
            Opcode::Mpyh => a.zip_words(b, |x, y| ((x >> 16).wrapping_mul(lo16u(y))) << 16),
            Opcode::Mpyi => a.map_words(|x| lo16s(x).wrapping_mul(imm) as u32),
            Opcode::Mpyui => a.map_words(|x| lo16u(x).wrapping_mul(imm as u32 & 0xFFFF)),
            Opcode::Mpya => {
                let prod = a.zip_words(b, |x, y| lo16s(x).wrapping_mul(lo16s(y)) as u32);
                prod.zip_words(c, u32::wrapping_add)
            }
            _ => Quadword::ZERO,
        }
    }
}

impl ExecutionUnit for SinglePrecision {
    fn id(&self) -> UnitId {
        UnitId::SinglePrecision
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        Self::compute(req)
    }
}
