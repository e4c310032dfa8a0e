//! Simulator Façade Tests.

use pretty_assertions::assert_eq;
use spusim_core::Simulator;
use spusim_core::common::Quadword;
use spusim_core::config::Config;
use spusim_core::core::pipeline::hazards::IssueState;

use crate::common::harness::init_tracing;

fn simulator(source: &str) -> Simulator {
    init_tracing();
    let mut sim = Simulator::new(&Config::default());
    sim.load_assembly(source).unwrap();
    sim
}

#[test]
fn empty_program_is_already_drained() {
    let mut sim = Simulator::new(&Config::default());
    assert!(sim.run_until_drained());
    assert_eq!(sim.stats().cycles, 0);
}

#[test]
fn run_until_drained_stops_at_cycle_limit() {
    let mut config = Config::default();
    config.run.max_cycles = 25;
    let mut sim = Simulator::new(&config);
    sim.load_assembly("br 0\nlnop").unwrap();
    assert!(!sim.run_until_drained());
    assert_eq!(sim.stats().cycles, 25);
}

#[test]
fn zero_reset_pattern_by_default() {
    let mut sim = simulator("a $3, $1, $2\nlnop");
    assert!(sim.run_until_drained());
    assert_eq!(sim.register(3), Quadword::ZERO);
}

#[test]
fn preset_registers_feed_the_program() {
    let mut sim = simulator("a $3, $1, $2\nlnop");
    sim.set_register(1, Quadword::from_words([1, 2, 3, 4]));
    sim.set_register(2, Quadword::from_words([10, 20, 30, 40]));
    assert!(sim.run_until_drained());
    assert_eq!(sim.register(3).words(), [11, 22, 33, 44]);
}

#[test]
fn reset_replays_the_loaded_program() {
    let mut sim = simulator("il $1, 3\nlnop\nai $1, $1, 4\nlnop");
    assert!(sim.run_until_drained());
    let first = *sim.stats();
    assert_eq!(sim.register(1).preferred(), 7);

    sim.reset();
    assert_eq!(sim.state(), IssueState::IdleAfterReset);
    assert_eq!(sim.register(1), Quadword::ZERO);
    assert!(sim.run_until_drained());
    assert_eq!(*sim.stats(), first);
    assert_eq!(sim.register(1).preferred(), 7);
}

#[test]
fn reset_keeps_local_store() {
    let mut sim = simulator("il $1, 9\nlnop\nnop\nstqd $1, 0($0)");
    assert!(sim.run_until_drained());
    sim.reset();
    assert_eq!(sim.local_store().read(0), Quadword::splat_word(9));
}

#[test]
fn run_counts_cycles_exactly() {
    let mut sim = simulator("lnop");
    sim.run(5);
    sim.tick();
    assert_eq!(sim.stats().cycles, 6);
    assert_eq!(sim.last_issue().cycle, 5);
}
