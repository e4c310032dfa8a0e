//! Statistics Tests.
//!
//! Verifies that `SimStats` counters track what the core actually did.

use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use spusim_core::stats::{STATS_SECTIONS, SimStats};

#[test]
fn counts_dual_issue_and_cycles() {
    // One pair with a unit on each lane, then one with an explicit no-op.
    let mut ctx = TestContext::new().asm("il $1, 1\nlqd $2, 0($3)\nil $4, 2\nlnop");
    ctx.run(3);
    let stats = *ctx.sim.stats();
    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.dual_issue_cycles, 1);
    assert_eq!(stats.instructions_issued, 3);
    assert_eq!(stats.first_stalls + stats.second_stalls, 0);
}

#[test]
fn unrecognised_words_are_counted_and_recorded() {
    let mut ctx = TestContext::new().words(&[0x9FFF_FFFF, 0]);
    ctx.run(2);
    assert_eq!(ctx.sim.stats().unrecognized, 1);
    assert_eq!(ctx.sim.diagnostics().len(), 1);
}

#[test]
fn report_lists_every_section() {
    let text = SimStats::default().to_string();
    assert!(text.contains("sim_cycles"));
    assert!(text.contains("stalls.pair"));
    assert!(text.contains("branch.taken"));
    assert!(text.contains("forward.tier_b"));
    assert_eq!(STATS_SECTIONS.len(), 4);
}

#[test]
fn reset_clears_counters() {
    let mut ctx = TestContext::new().asm("il $1, 1");
    ctx.run(4);
    ctx.sim.reset();
    assert_eq!(*ctx.sim.stats(), SimStats::default());
}
