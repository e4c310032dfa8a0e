//! Simulator: owns the core and its configuration.
//!
//! The façade used by hosts and tests. It loads programs from words,
//! assembly text or image files, clocks the core, and exposes registers,
//! the local store and statistics.

use std::path::Path;

use tracing::{debug, info};

use crate::common::error::SimResult;
use crate::common::Quadword;
use crate::config::Config;
use crate::core::Spu;
use crate::core::cpu::Diagnostic;
use crate::core::pipeline::hazards::IssueState;
use crate::core::pipeline::latches::IssueRecord;
use crate::core::units::lsu::LocalStore;
use crate::isa::asm;
use crate::sim::loader;
use crate::stats::SimStats;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The core.
    pub spu: Spu,
    config: Config,
}

impl Simulator {
    /// Creates a simulator in reset state with an empty program.
    pub fn new(config: &Config) -> Self {
        Self {
            spu: Spu::new(config),
            config: config.clone(),
        }
    }

    /// Loads instruction words and resets the core.
    pub fn load_program(&mut self, program: &[u32]) -> SimResult<()> {
        self.spu.load_program(program)?;
        info!(words = program.len(), "program loaded");
        Ok(())
    }

    /// Assembles `source` and loads the result.
    pub fn load_assembly(&mut self, source: &str) -> SimResult<()> {
        let words = asm::assemble(source)?;
        self.load_program(&words)
    }

    /// Loads a binary program image from text.
    pub fn load_image_str(&mut self, text: &str) -> SimResult<()> {
        let words = loader::parse_image(text)?;
        self.load_program(&words)
    }

    /// Loads a binary program image file.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> SimResult<()> {
        let words = loader::load_image_file(path)?;
        self.load_program(&words)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        self.spu.tick();
    }

    /// Advances the simulator by `cycles` clock cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.spu.tick();
        }
    }

    /// Runs until the core drains or `run.max_cycles` cycles have elapsed.
    ///
    /// Returns whether the core drained.
    pub fn run_until_drained(&mut self) -> bool {
        let limit = self.config.run.max_cycles;
        while self.spu.stats.cycles < limit {
            if self.spu.is_drained() {
                debug!(cycles = self.spu.stats.cycles, "core drained");
                return true;
            }
            self.spu.tick();
        }
        let drained = self.spu.is_drained();
        if !drained {
            info!(limit, "cycle limit reached before the core drained");
        }
        drained
    }

    /// Returns the core to reset state, keeping the loaded program.
    pub fn reset(&mut self) {
        self.spu.reset();
    }

    /// Architectural value of register `addr`.
    pub fn register(&self, addr: u8) -> Quadword {
        self.spu.register(addr)
    }

    /// Overwrites register `addr`.
    pub fn set_register(&mut self, addr: u8, value: Quadword) {
        self.spu.regs.write(addr, value);
    }

    /// The data local store.
    pub const fn local_store(&self) -> &LocalStore {
        &self.spu.local_store
    }

    /// Mutable access to the data local store.
    pub const fn local_store_mut(&mut self) -> &mut LocalStore {
        &mut self.spu.local_store
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.spu.stats
    }

    /// Issue state for the next cycle.
    pub const fn state(&self) -> IssueState {
        self.spu.state
    }

    /// What the issue stage did in the last cycle.
    pub const fn last_issue(&self) -> &IssueRecord {
        &self.spu.last_issue
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.spu.diagnostics
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
