//! Byte unit.
//!
//! Latency 3. Per-byte population count, average, absolute difference and
//! the per-word byte sums used by motion-estimation kernels.

use crate::common::Quadword;
use crate::core::units::lsu::LocalStore;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// The byte unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteUnit;

impl ByteUnit {
    /// Computes a byte-unit result.
    pub fn compute(req: &UnitRequest) -> Quadword {
        let (a, b) = (req.a, req.b);
        match req.op {
            Opcode::Cntb => Quadword::from_bytes(a.bytes().map(|x| x.count_ones() as u8)),
            Opcode::Avgb => a.zip_bytes(b, |x, y| ((u16::from(x) + u16::from(y) + 1) >> 1) as u8),
            Opcode::Absdb => a.zip_bytes(b, u8::abs_diff),
            Opcode::Sumb => {
                let (ab, bb) = (a.bytes(), b.bytes());
                let sum = |bytes: &[u8; 16], w: usize| -> u32 {
                    bytes[w * 4..w * 4 + 4].iter().map(|&x| u32::from(x)).sum()
                };
                Quadword::from_words(std::array::from_fn(|w| (sum(&bb, w) << 16) | sum(&ab, w)))
            }
            _ => Quadword::ZERO,
        }
    }
}

impl ExecutionUnit for ByteUnit {
    fn id(&self) -> UnitId {
        UnitId::Byte
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        Self::compute(req)
    }
}
