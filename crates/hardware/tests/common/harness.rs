//! Test harness around the simulator.

use spusim_core::Simulator;
use spusim_core::common::Quadword;
use spusim_core::config::{Config, RegisterInit};
use spusim_core::core::pipeline::hazards::IssueState;
use spusim_core::core::pipeline::latches::IssueRecord;
use spusim_core::isa::asm::assemble;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber once per test binary; `RUST_LOG` selects events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub sim: Simulator,
    /// Issue records of every cycle run through `step`, oldest first.
    pub history: Vec<IssueRecord>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A simulator with every register reset to its own index.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.core.register_init = RegisterInit::Indexed;
        config.general.trace = true;
        config.general.diagnostics = true;
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        Self {
            sim: Simulator::new(config),
            history: Vec::new(),
        }
    }

    /// Assembles and loads `source`.
    pub fn asm(mut self, source: &str) -> Self {
        self.sim.load_assembly(source).unwrap();
        self.history.clear();
        self
    }

    /// Loads raw instruction words.
    pub fn words(mut self, words: &[u32]) -> Self {
        self.sim.load_program(words).unwrap();
        self.history.clear();
        self
    }

    /// Runs one cycle and returns what the issue stage did.
    pub fn step(&mut self) -> IssueRecord {
        self.sim.tick();
        let record = *self.sim.last_issue();
        self.history.push(record);
        record
    }

    /// Runs `cycles` cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.step();
        }
    }

    /// Runs until drained; panics if the cycle bound is hit.
    pub fn drain(&mut self) {
        while !self.sim.spu.is_drained() {
            assert!(
                self.sim.stats().cycles < self.sim.config().run.max_cycles,
                "core did not drain"
            );
            let _ = self.step();
        }
    }

    pub fn reg(&self, addr: u8) -> Quadword {
        self.sim.register(addr)
    }

    pub fn word(&self, addr: u8) -> u32 {
        self.sim.register(addr).preferred()
    }

    pub fn state(&self) -> IssueState {
        self.sim.state()
    }
}

/// Assembles a single instruction.
pub fn one(source: &str) -> u32 {
    assemble(source).unwrap()[0]
}
