//! Classifier Tests.
//!
//! Verifies that the classifier routes every catalogue row to its unit and
//! lane, extracts the operand slots each format defines, and degrades every
//! other word to the lane-less no-op.

use crate::common::builder::instruction::{InstructionBuilder, ri, rr};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use spusim_core::core::units::{Lane, UnitId};
use spusim_core::isa::decode::{classify, decode, is_recognized};
use spusim_core::isa::instruction::Operand;
use spusim_core::isa::opcodes::{self, Opcode};

#[test]
fn every_catalogue_row_decodes_to_itself() {
    for lane in Lane::ALL {
        for info in opcodes::table(lane) {
            let word = InstructionBuilder::new(info.op)
                .rt(5)
                .ra(6)
                .rb(7)
                .rc(8)
                .imm(3)
                .build();
            let d = decode(word);
            assert_eq!(d.op, info.op, "{}", info.mnemonic);
            assert_eq!(d.lane, Some(lane), "{}", info.mnemonic);
            assert_eq!(d.unit, info.unit, "{}", info.mnemonic);
            assert_eq!(classify(word, lane), d, "{}", info.mnemonic);
        }
    }
}

#[rstest]
#[case::fixed1(rr(Opcode::A, 1, 2, 3), UnitId::Fixed1, Lane::Even)]
#[case::fixed2(ri(Opcode::Shli, 1, 2, 3), UnitId::Fixed2, Lane::Even)]
#[case::byte(rr(Opcode::Sumb, 1, 2, 3), UnitId::Byte, Lane::Even)]
#[case::single_precision(rr(Opcode::Fa, 1, 2, 3), UnitId::SinglePrecision, Lane::Even)]
#[case::permute(rr(Opcode::Rotqby, 1, 2, 3), UnitId::Permute, Lane::Odd)]
#[case::local_store(ri(Opcode::Lqd, 1, 2, 3), UnitId::LocalStore, Lane::Odd)]
#[case::branch(InstructionBuilder::new(Opcode::Br).imm(4).build(), UnitId::Branch, Lane::Odd)]
fn unit_and_lane_routing(#[case] word: u32, #[case] unit: UnitId, #[case] lane: Lane) {
    let d = decode(word);
    assert_eq!(d.unit, Some(unit));
    assert_eq!(d.lane, Some(lane));
    assert_eq!(unit.lane(), lane);
}

#[test]
fn rr_operand_slots() {
    let d = decode(rr(Opcode::A, 10, 20, 30));
    assert_eq!(d.dest, 10);
    assert!(d.write);
    assert_eq!(d.a, Operand::reg(20));
    assert_eq!(d.b, Operand::reg(30));
    assert_eq!(d.c, Operand::NONE);
}

#[test]
fn rrr_reads_three_and_writes_upper_field() {
    let word = InstructionBuilder::new(Opcode::Fma)
        .rt(9)
        .ra(1)
        .rb(2)
        .rc(3)
        .build();
    let d = decode(word);
    assert_eq!(d.dest, 9);
    assert_eq!(d.sources(), [Operand::reg(1), Operand::reg(2), Operand::reg(3)]);
}

#[test]
fn store_reads_rt_and_writes_nothing() {
    let d = decode(ri(Opcode::Stqd, 4, 1, -2));
    assert!(!d.write);
    assert_eq!(d.writes(), None);
    assert!(d.reads(4));
    assert!(d.reads(1));
    assert_eq!(d.imm, -2);
}

#[test]
fn merge_immediate_reads_its_destination() {
    let d = decode(InstructionBuilder::new(Opcode::Iohl).rt(12).imm(0x1234).build());
    assert!(d.write);
    assert!(d.reads(12));
}

#[rstest]
#[case::ri7(ri(Opcode::Shli, 1, 2, -1), -1)]
#[case::ri10(ri(Opcode::Ai, 1, 2, -512), -512)]
#[case::ri16(InstructionBuilder::new(Opcode::Il).rt(1).imm(-32768).build(), -32768)]
#[case::ri18_zero_extended(InstructionBuilder::new(Opcode::Ila).rt(1).imm(0x3_FFFF).build(), 0x3_FFFF)]
fn immediates_extend_per_format(#[case] word: u32, #[case] imm: i32) {
    assert_eq!(decode(word).imm, imm);
}

#[test]
fn zero_word_is_lane_less_null() {
    let d = decode(0);
    assert_eq!(d.op, Opcode::Null);
    assert_eq!(d.lane, None);
    assert_eq!(d.unit, None);
    assert!(!is_recognized(0));
}

#[test]
fn explicit_nops_occupy_their_lane() {
    let nop = decode(InstructionBuilder::new(Opcode::Nop).build());
    let lnop = decode(InstructionBuilder::new(Opcode::Lnop).build());
    assert_eq!((nop.lane, nop.unit), (Some(Lane::Even), None));
    assert_eq!((lnop.lane, lnop.unit), (Some(Lane::Odd), None));
}

#[test]
fn wrong_lane_classifies_as_noop() {
    let word = ri(Opcode::Lqd, 1, 2, 0);
    assert_eq!(classify(word, Lane::Even).op, Opcode::Unknown);
    assert_eq!(classify(word, Lane::Odd).op, Opcode::Lqd);
}

proptest! {
    #[test]
    fn decode_is_total_and_consistent(raw in any::<u32>()) {
        let d = decode(raw);
        prop_assert_eq!(d.raw, raw);
        prop_assert_eq!(decode(raw), d);
        if is_recognized(raw) {
            let lane = d.lane.unwrap();
            prop_assert_eq!(classify(raw, lane), d);
            prop_assert_eq!(d.unit.map(UnitId::lane).unwrap_or(lane), lane);
        } else {
            prop_assert!(d.is_noop());
            prop_assert_eq!(d.lane, None);
            prop_assert_eq!(d.sources().iter().filter(|s| s.valid).count(), 0);
        }
    }

    #[test]
    fn register_fields_are_seven_bits(raw in any::<u32>()) {
        let d = decode(raw);
        for s in d.sources() {
            prop_assert!(s.addr < 128);
        }
        prop_assert!(d.dest < 128);
    }
}
