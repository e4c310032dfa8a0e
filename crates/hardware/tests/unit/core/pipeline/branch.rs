//! Branch Resolution Tests.
//!
//! Taken branches redirect Fetch on the following cycle, flush the
//! wrong-path pair and, when first in their pair, squash their sibling.

use crate::common::builder::instruction::{br, lnop};
use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use rstest::rstest;
use spusim_core::common::Quadword;
use spusim_core::core::pipeline::hazards::IssueState;
use spusim_core::core::pipeline::latches::{BranchOrder, Refill, SlotFate};
use spusim_core::core::units::Lane;
use spusim_core::isa::opcodes::Opcode;

#[test]
fn taken_branch_first_in_pair_squashes_sibling() {
    let mut ctx = TestContext::new().asm(
        "br 4\n\
         il $7, 99\n\
         il $8, 1\n\
         lnop\n\
         il $10, 5\n\
         lnop",
    );

    let _ = ctx.step();
    let issue = ctx.step();
    assert_eq!(issue.order, BranchOrder::OddFirst);
    assert_eq!(issue.redirect, Some(4));
    let branch = issue.first.unwrap();
    assert_eq!((branch.decoded.op, branch.lane, branch.fate), (Opcode::Br, Lane::Odd, SlotFate::Issued));
    let sibling = issue.second.unwrap();
    assert_eq!((sibling.lane, sibling.fate), (Lane::Even, SlotFate::Squashed));
    assert_eq!(ctx.state(), IssueState::BranchFlush);

    let flush = ctx.step();
    assert_eq!(flush.state, IssueState::BranchFlush);
    assert!(flush.first.is_none());

    let target = ctx.step();
    assert_eq!(target.first.map(|s| s.pc), Some(4));

    ctx.drain();
    let stats = *ctx.sim.stats();
    assert_eq!(stats.taken_branches, 1);
    assert_eq!(stats.squashes, 1);
    assert_eq!(stats.flush_cycles, 1);
    assert_eq!(stats.instructions_issued, 2);
    assert_eq!(ctx.word(7), 7, "squashed sibling must not write");
    assert_eq!(ctx.word(8), 8, "wrong-path pair must not issue");
    assert_eq!(ctx.word(10), 5);
}

#[test]
fn taken_branch_second_in_pair_keeps_first() {
    let mut ctx = TestContext::new().asm(
        "il $3, 30\n\
         br 3\n\
         il $5, 50\n\
         lnop\n\
         il $6, 60\n\
         lnop",
    );
    let _ = ctx.step();
    let issue = ctx.step();
    assert_eq!(issue.order, BranchOrder::EvenFirst);
    assert_eq!(issue.redirect, Some(4));
    assert_eq!(issue.dispatched(), 2);

    ctx.drain();
    assert_eq!(ctx.sim.stats().squashes, 0);
    assert_eq!(ctx.sim.stats().dual_issue_cycles, 1);
    assert_eq!(ctx.word(3), 30);
    assert_eq!(ctx.word(5), 5);
    assert_eq!(ctx.word(6), 60);
}

/// `$0` holds zero and `$1` holds one under the indexed reset pattern.
#[rstest]
#[case::brz_taken("brz $0, 2", true)]
#[case::brz_not_taken("brz $1, 2", false)]
#[case::brnz_taken("brnz $1, 2", true)]
#[case::brnz_not_taken("brnz $0, 2", false)]
#[case::brhz_taken("brhz $0, 2", true)]
#[case::brhnz_not_taken("brhnz $0, 2", false)]
fn conditional_branch(#[case] branch: &str, #[case] taken: bool) {
    let mut ctx = TestContext::new().asm(&format!("{branch}\nil $5, 50\nil $6, 60\nlnop"));
    ctx.drain();

    let stats = ctx.sim.stats();
    assert_eq!(stats.taken_branches, u64::from(taken));
    assert_eq!(stats.squashes, u64::from(taken));
    assert_eq!(stats.flush_cycles, u64::from(taken));
    assert_eq!(ctx.word(5), if taken { 5 } else { 50 });
    assert_eq!(ctx.word(6), 60);
}

#[test]
fn branch_and_link_writes_return_address() {
    let mut ctx = TestContext::new().asm("brsl $20, 2\nil $7, 70\nil $3, 1\nlnop");
    ctx.drain();
    assert_eq!(ctx.reg(20), Quadword::from_words([1, 0, 0, 0]));
    assert_eq!(ctx.word(7), 7);
    assert_eq!(ctx.word(3), 1);
}

/// Every unconditional form lands on pc 6 from pc 2; `$6` holds 6.
#[rstest]
#[case::br("br 4", None)]
#[case::brsl("brsl $20, 4", Some(20))]
#[case::bra("bra 6", None)]
#[case::brasl("brasl $20, 6", Some(20))]
#[case::bi("bi $6", None)]
#[case::bisl("bisl $20, $6", Some(20))]
fn unconditional_branch(#[case] branch: &str, #[case] link: Option<u8>) {
    let mut ctx = TestContext::new().asm(&format!(
        "il $3, 30\n\
         lnop\n\
         {branch}\n\
         il $7, 70\n\
         il $8, 80\n\
         lnop\n\
         il $10, 5\n\
         lnop"
    ));
    ctx.drain();

    let issue = ctx
        .history
        .iter()
        .find(|r| r.redirect.is_some())
        .copied()
        .unwrap();
    assert_eq!(issue.redirect, Some(6));
    assert_eq!(issue.first.map(|s| s.pc), Some(2));
    assert_eq!(issue.second.map(|s| s.fate), Some(SlotFate::Squashed));

    let wrong_path = ctx
        .history
        .iter()
        .flat_map(|r| [r.first, r.second])
        .flatten()
        .any(|s| s.pc == 4 || s.pc == 5);
    assert!(!wrong_path, "wrong-path pair must not reach issue");

    let stats = ctx.sim.stats();
    assert_eq!(stats.taken_branches, 1);
    assert_eq!(stats.squashes, 1);
    assert_eq!(ctx.word(3), 30);
    assert_eq!(ctx.word(7), 7);
    assert_eq!(ctx.word(8), 8);
    assert_eq!(ctx.word(10), 5);
    match link {
        Some(rt) => assert_eq!(ctx.reg(rt), Quadword::from_words([3, 0, 0, 0])),
        None => assert_eq!(ctx.reg(20), Quadword::splat_word(20)),
    }
}

#[test]
fn indirect_branch_and_link_reaches_register_target() {
    let mut source = vec!["bisl $21, $9", "il $7, 70"];
    source.extend(["il $2, 222"; 7]);
    source.extend(["il $4, 40", "lnop"]);
    let mut ctx = TestContext::new().asm(&source.join("\n"));

    ctx.run(3);
    assert_eq!(ctx.sim.spu.fetch.latch().map(|p| p.first.pc), Some(9));

    ctx.drain();
    assert_eq!(ctx.reg(21), Quadword::from_words([1, 0, 0, 0]));
    assert_eq!(ctx.word(7), 7);
    assert_eq!(ctx.word(2), 2);
    assert_eq!(ctx.word(4), 40);
}

#[test]
fn indirect_branch_to_odd_target_straddles() {
    let mut source = vec!["bi $9", "nop"];
    source.extend(["il $2, 222"; 7]);
    source.extend(["il $4, 40", "lnop"]);
    let mut ctx = TestContext::new().asm(&source.join("\n"));

    ctx.run(3);
    let latch = *ctx.sim.spu.fetch.latch().unwrap();
    assert_eq!(latch.first.pc, 9);
    assert_eq!(latch.refill, Refill::Straddle);

    ctx.drain();
    assert_eq!(ctx.word(4), 40);
    assert_eq!(ctx.word(2), 2);
}

#[test]
fn branch_to_itself_never_drains() {
    let mut ctx = TestContext::new().words(&[br(0), lnop()]);
    ctx.sim.run(40);
    assert!(!ctx.sim.spu.is_drained());
    assert_eq!(ctx.sim.stats().taken_branches, 20);
}
