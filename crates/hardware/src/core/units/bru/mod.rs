//! Branch unit (BRU).
//!
//! Branches are resolved at issue by the stateless [`resolver`]; the unit
//! itself only carries the link value of `brsl`, `brasl` and `bisl` through
//! the forward network with latency 1.

/// Stateless branch resolution (taken, target, link, squash).
pub mod resolver;

pub use self::resolver::{BranchOutcome, resolve};

use crate::common::Quadword;
use crate::core::units::lsu::LocalStore;
use crate::core::units::{ExecutionUnit, UnitId, UnitRequest};
use crate::isa::opcodes::Opcode;

/// The branch unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchUnit;

impl BranchUnit {
    /// Link register value for `pc`: the return address in the preferred slot.
    pub fn link_value(pc: u32) -> Quadword {
        Quadword::from_words([pc.wrapping_add(1), 0, 0, 0])
    }
}

impl ExecutionUnit for BranchUnit {
    fn id(&self) -> UnitId {
        UnitId::Branch
    }

    fn execute(&mut self, req: &UnitRequest, _local_store: &mut LocalStore) -> Quadword {
        match req.op {
            Opcode::Brsl | Opcode::Brasl | Opcode::Bisl => Self::link_value(req.pc),
            _ => Quadword::ZERO,
        }
    }
}
