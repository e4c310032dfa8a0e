//! Disassembler Tests.

use crate::common::builder::instruction::{InstructionBuilder, ri, rr};
use pretty_assertions::assert_eq;
use rstest::rstest;
use spusim_core::isa::decode::decode;
use spusim_core::isa::disasm::disassemble;
use spusim_core::isa::opcodes::Opcode;

#[rstest]
#[case(rr(Opcode::Xor, 1, 2, 3), "xor $1, $2, $3")]
#[case(ri(Opcode::Ai, 4, 5, -6), "ai $4, $5, -6")]
#[case(ri(Opcode::Lqd, 4, 1, 2), "lqd $4, 2($1)")]
#[case(ri(Opcode::Stqd, 7, 1, 0), "stqd $7, 0($1)")]
#[case(rr(Opcode::Stqx, 7, 1, 2), "stqx $7, $1, $2")]
#[case(InstructionBuilder::new(Opcode::Brz).rt(3).imm(-4).build(), "brz $3, -4")]
#[case(rr(Opcode::Bi, 0, 9, 0), "bi $9")]
#[case(rr(Opcode::Biz, 2, 9, 0), "biz $2, $9")]
#[case(InstructionBuilder::new(Opcode::Selb).rt(1).ra(2).rb(3).rc(4).build(), "selb $1, $2, $3, $4")]
#[case(InstructionBuilder::new(Opcode::Lnop).build(), "lnop")]
#[case(0, "null")]
#[case(0x9FFF_FFFF, ".long 0x9fffffff")]
fn renders_assembler_syntax(#[case] word: u32, #[case] text: &str) {
    assert_eq!(disassemble(&decode(word)), text);
}

#[test]
fn display_matches_disassemble() {
    let d = decode(rr(Opcode::A, 1, 2, 3));
    assert_eq!(d.to_string(), disassemble(&d));
}
