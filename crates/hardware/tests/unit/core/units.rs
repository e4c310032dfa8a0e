//! Execution Unit Tests.
//!
//! Units are exercised both directly, through `UnitPipe`, and by short
//! programs whose results reach the register file.

use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use spusim_core::common::Quadword;
use spusim_core::core::units::lsu::LocalStore;
use spusim_core::core::units::{UnitId, UnitPipe, UnitRequest, build_unit};
use spusim_core::isa::opcodes::Opcode;

fn request(op: Opcode) -> UnitRequest {
    UnitRequest {
        op,
        dest: 12,
        write: true,
        a: Quadword::splat_word(3),
        b: Quadword::splat_word(4),
        c: Quadword::splat_word(0x40),
        ..Default::default()
    }
}

#[test]
fn built_units_report_their_identity() {
    for id in UnitId::ALL {
        assert_eq!(build_unit(id).id(), id);
        assert_eq!(UnitPipe::new(id).line().depth(), id.max_latency());
    }
}

#[rstest]
#[case(UnitId::Fixed1, Opcode::A)]
#[case(UnitId::Fixed2, Opcode::Shl)]
#[case(UnitId::Byte, Opcode::Avgb)]
#[case(UnitId::SinglePrecision, Opcode::Fa)]
#[case(UnitId::SinglePrecision, Opcode::Mpy)]
#[case(UnitId::Permute, Opcode::Rotqby)]
#[case(UnitId::LocalStore, Opcode::Lqd)]
#[case(UnitId::Branch, Opcode::Brsl)]
fn pipe_completes_at_unit_latency(#[case] unit: UnitId, #[case] op: Opcode) {
    let mut pipe = UnitPipe::new(unit);
    let mut store = LocalStore::new(256);
    let req = request(op);
    pipe.submit(&req, &mut store);

    let mut completed = None;
    for cycle in 1..=unit.max_latency() {
        pipe.advance(|c| completed = Some((cycle, c)));
    }
    let (cycle, completion) = completed.unwrap();
    assert_eq!(cycle, unit.latency(req.is_integer()));
    assert_eq!(completion.unit, unit);
    assert_eq!(completion.dest, 12);
    assert!(completion.write);
    assert!(pipe.line().is_empty());
}

#[test]
fn squashed_store_has_no_side_effect() {
    let mut pipe = UnitPipe::new(UnitId::LocalStore);
    let mut store = LocalStore::new(256);
    let mut req = request(Opcode::Stqd);
    req.write = false;
    req.squashed = true;
    pipe.submit(&req, &mut store);
    assert!(store.as_bytes().iter().all(|&b| b == 0));

    req.squashed = false;
    pipe.submit(&req, &mut store);
    assert_eq!(store.read(3), Quadword::splat_word(0x40));
}

#[test]
fn immediate_halves_compose_a_word() {
    let mut ctx = TestContext::new().asm(
        "ilhu $3, 0x1234\n\
         lnop\n\
         iohl $3, 0x5678\n\
         lnop",
    );
    ctx.drain();
    assert_eq!(ctx.reg(3), Quadword::splat_word(0x1234_5678));
    assert_eq!(ctx.sim.stats().first_stalls, 1);
}

#[test]
fn store_then_load_through_local_store() {
    let mut ctx = TestContext::new().asm(
        "il $4, 0x55\n\
         lnop\n\
         nop\n\
         stqd $4, 2($0)\n\
         nop\n\
         lqd $5, 2($0)",
    );
    ctx.drain();
    assert_eq!(ctx.sim.local_store().read(32), Quadword::splat_word(0x55));
    assert_eq!(ctx.reg(5), Quadword::splat_word(0x55));
}

#[test]
fn select_bits_merges_under_mask() {
    let mut ctx = TestContext::new().asm(
        "il $10, -1\n\
         lnop\n\
         andi $11, $10, 0xF\n\
         lnop\n\
         selb $12, $1, $2, $11\n\
         lnop",
    );
    ctx.drain();
    // $1 = 1, $2 = 2, mask low four bits
    assert_eq!(ctx.word(12), 2);
}
