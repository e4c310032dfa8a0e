//! Branch resolver.
//!
//! A pure function of the decoded branch, its operand values, its own
//! address and its position in the issued pair. Addresses count instruction
//! words. Relative targets are `pc + I16`, absolute targets are `I16`, and
//! indirect targets come from the preferred word of RA.
//!
//! Conditional forms test the preferred word (`brz`, `brnz`, `biz`, `binz`)
//! or the preferred halfword (`brhz`, `brhnz`, `bihz`, `bihnz`) of RT. When
//! a conditional branch falls through its target is `pc + 1`.

use crate::common::Quadword;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::Opcode;

/// Result of resolving one branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Whether control transfers to `target`.
    pub taken: bool,
    /// Next instruction address (word units).
    pub target: u32,
    /// Return address written by link forms; zero otherwise.
    pub link: u32,
    /// The program-order-second instruction of the pair must be cancelled.
    pub squash_sibling: bool,
}

/// Resolves `d` at address `pc`.
///
/// `ra` and `rt` are the forwarded values of the RA and RT operands.
/// Encodings that are not branches resolve not-taken with zero target
/// and link.
pub fn resolve(d: &Decoded, ra: Quadword, rt: Quadword, pc: u32, first_in_pair: bool) -> BranchOutcome {
    let rel = pc.wrapping_add(d.imm as u32);
    let abs = d.imm as u32;
    let indirect = ra.preferred();
    let next = pc.wrapping_add(1);
    let link = next;
    let word_zero = rt.preferred() == 0;
    let half_zero = rt.preferred_halfword() == 0;

    let (taken, target, link) = match d.op {
        Opcode::Br => (true, rel, 0),
        Opcode::Brsl => (true, rel, link),
        Opcode::Bra => (true, abs, 0),
        Opcode::Brasl => (true, abs, link),
        Opcode::Bi => (true, indirect, 0),
        Opcode::Bisl => (true, indirect, link),
        Opcode::Brz => (word_zero, rel, 0),
        Opcode::Brnz => (!word_zero, rel, 0),
        Opcode::Brhz => (half_zero, rel, 0),
        Opcode::Brhnz => (!half_zero, rel, 0),
        Opcode::Biz | Opcode::Binz | Opcode::Bihz | Opcode::Bihnz => {
            let taken = match d.op {
                Opcode::Biz => word_zero,
                Opcode::Binz => !word_zero,
                Opcode::Bihz => half_zero,
                _ => !half_zero,
            };
            (taken, if taken { indirect } else { next }, 0)
        }
        _ => (false, 0, 0),
    };

    BranchOutcome {
        taken,
        target,
        link,
        squash_sibling: taken && first_in_pair,
    }
}
