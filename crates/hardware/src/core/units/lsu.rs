//! Local store and Load/Store Unit (LSU).
//!
//! The local store is a flat byte array accessed a quadword at a time.
//! Addresses are truncated to quadword alignment and wrap modulo the store
//! size, so no access can fault. The LSU is in-order with latency 5; stores
//! write the local store when they are submitted, which keeps loads and
//! stores sequentially consistent without a store buffer.

use crate::common::constants::QUADWORD_BYTES;
use crate::common::Quadword;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// Byte-addressed local store.
#[derive(Clone, Debug)]
pub struct LocalStore {
    bytes: Vec<u8>,
}

impl LocalStore {
    /// Creates a zeroed local store of `size` bytes, rounded down to whole
    /// quadwords (at least one).
    pub fn new(size: usize) -> Self {
        let quads = (size / QUADWORD_BYTES).max(1);
        Self {
            bytes: vec![0; quads * QUADWORD_BYTES],
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a local store holds at least one quadword.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte offset of the quadword containing `addr`.
    pub fn offset(&self, addr: u32) -> usize {
        (addr as usize & !(QUADWORD_BYTES - 1)) % self.bytes.len()
    }

    /// Reads the quadword containing `addr`.
    pub fn read(&self, addr: u32) -> Quadword {
        let off = self.offset(addr);
        let mut buf = [0u8; QUADWORD_BYTES];
        buf.copy_from_slice(&self.bytes[off..off + QUADWORD_BYTES]);
        Quadword::from_bytes(buf)
    }

    /// Writes the quadword containing `addr`.
    pub fn write(&mut self, addr: u32, value: Quadword) {
        let off = self.offset(addr);
        self.bytes[off..off + QUADWORD_BYTES].copy_from_slice(&value.bytes());
    }

    /// Raw bytes of the store.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The load/store unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadStoreUnit;

impl LoadStoreUnit {
    /// Effective byte address of a local-store instruction.
    ///
    /// `lqd`/`stqd` scale the displacement by a quadword, `lqa`/`stqa` scale
    /// the absolute immediate by a word, `lqx`/`stqx` add two registers.
    pub fn address(req: &UnitRequest) -> u32 {
        let base = req.a.preferred();
        let imm = req.imm as u32;
        match req.op {
            Opcode::Lqd | Opcode::Stqd => base.wrapping_add(imm << 4),
            Opcode::Lqx | Opcode::Stqx => base.wrapping_add(req.b.preferred()),
            Opcode::Lqa | Opcode::Stqa => (imm & 0xFFFF) << 2,
            _ => 0,
        }
    }
}

impl ExecutionUnit for LoadStoreUnit {
    fn id(&self) -> UnitId {
        UnitId::LocalStore
    }

    fn execute(&mut self, req: &UnitRequest, local_store: &mut LocalStore) -> Quadword {
        let addr = Self::address(req);
        match req.op {
            Opcode::Lqd | Opcode::Lqx | Opcode::Lqa => local_store.read(addr),
            Opcode::Stqd | Opcode::Stqx | Opcode::Stqa => {
                local_store.write(addr, req.c);
                Quadword::ZERO
            }
            _ => Quadword::ZERO,
        }
    }
}
