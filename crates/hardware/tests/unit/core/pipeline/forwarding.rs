//! Operand Forwarding Tests.
//!
//! Results are visible through the Tier B queues from completion until
//! they commit, through the Tier A commit ports in the cycle they commit,
//! and from the register file afterwards. Every instruction commits seven
//! cycles after it issues.

use crate::common::builder::instruction::{il, lnop, ri};
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use spusim_core::common::Quadword;
use spusim_core::core::pipeline::forward::priority;
use spusim_core::core::units::{Lane, UnitId};
use spusim_core::isa::opcodes::Opcode;

/// `il $1, 9` in the first pair, `gap_pairs` pairs of zero words, then
/// `ai $2, $1, 0`.
fn reader_after(gap_pairs: usize) -> TestContext {
    let mut words = vec![il(1, 9), lnop()];
    words.extend(vec![0; gap_pairs * 2]);
    words.extend([ri(Opcode::Ai, 2, 1, 0), lnop()]);
    let mut ctx = TestContext::new().words(&words);
    ctx.drain();
    ctx
}

#[rstest]
#[case::adjacent(0, 0, 1)]
#[case::tier_b_early(1, 0, 1)]
#[case::tier_b_late(5, 0, 1)]
#[case::commit_cycle(6, 1, 0)]
#[case::register_file(7, 0, 0)]
fn forwarding_tier_by_distance(#[case] gap_pairs: usize, #[case] tier_a: u64, #[case] tier_b: u64) {
    let ctx = reader_after(gap_pairs);
    assert_eq!(ctx.sim.stats().tier_a_forwards, tier_a);
    assert_eq!(ctx.sim.stats().tier_b_forwards, tier_b);
    assert_eq!(ctx.word(2), 9);
}

#[test]
fn youngest_writer_wins_over_slower_older_writer() {
    let mut ctx = TestContext::new().asm(
        "mpy $1, $9, $9\n\
         lnop\n\
         il $1, 2\n\
         lnop\n\
         ai $2, $1, 0\n\
         lnop",
    );
    ctx.drain();
    assert_eq!(ctx.sim.stats().first_stalls, 4);
    assert_eq!(ctx.word(2), 2);
    assert_eq!(ctx.word(1), 2, "later writer commits last");
}

#[test]
fn priority_order_within_each_lane() {
    let mut even: Vec<_> = [
        (UnitId::SinglePrecision, true),
        (UnitId::SinglePrecision, false),
        (UnitId::Fixed2, false),
        (UnitId::Byte, false),
        (UnitId::Fixed1, false),
    ]
    .iter()
    .map(|&(unit, int)| priority(unit, int))
    .collect();
    assert!(even.is_sorted());
    even.dedup();
    assert_eq!(even.len(), 5);

    let odd: Vec<_> = [UnitId::LocalStore, UnitId::Permute, UnitId::Branch]
        .iter()
        .map(|&unit| {
            assert_eq!(unit.lane(), Lane::Odd);
            priority(unit, false)
        })
        .collect();
    assert_eq!(odd, vec![0, 1, 2]);
}

/// Issued in cycle 1, the value is architectural after the tick of cycle 8.
#[rstest]
#[case::fixed1("il $1, 5\nlnop", 1, 5)]
#[case::fixed2("shli $1, $9, 1\nlnop", 1, 18)]
#[case::byte("cntb $1, $9\nlnop", 1, 2)]
#[case::sp_float("fa $1, $0, $0\nlnop", 1, 0)]
#[case::sp_integer("mpy $1, $9, $9\nlnop", 1, 81)]
#[case::permute("nop\nrotqbyi $1, $9, 0", 1, 9)]
#[case::local_store("nop\nlqd $1, 0($0)", 1, 77)]
#[case::branch_link("brsl $20, 1\nlnop", 20, 1)]
fn commit_seven_cycles_after_issue(#[case] source: &str, #[case] dest: u8, #[case] expected: u32) {
    let mut ctx = TestContext::new().asm(source);
    ctx.sim.local_store_mut().write(0, Quadword::splat_word(77));

    ctx.run(8);
    assert_eq!(ctx.word(dest), u32::from(dest), "not yet committed");
    let _ = ctx.step();
    assert_eq!(ctx.word(dest), expected);
}
