//! SPU Core Definition and Initialization.
//!
//! This module defines the central `Spu` structure, which serves as the container for the
//! entire core state. It coordinates the following:
//! 1. **State Management:** Register file, local store and instruction store.
//! 2. **Pipeline Control:** Fetch stage, retry buffer, issue state and the writer scoreboard.
//! 3. **Execution:** Seven unit pipes and the two forward queues.
//! 4. **Observability:** Statistics, the last issue record and optional diagnostics.

/// Per-cycle tick: commit, completion write-in, issue and fetch.
pub mod execution;

use crate::common::constants::ISSUE_WIDTH;
use crate::common::error::SimResult;
use crate::common::Quadword;
use crate::config::Config;
use crate::core::arch::regfile::RegisterFile;
use crate::core::pipeline::fetch::{InstructionFetch, InstructionStore};
use crate::core::pipeline::forward::{DroppedWriter, ForwardNetwork};
use crate::core::pipeline::hazards::IssueState;
use crate::core::pipeline::latches::{IssueRecord, RetryBuffer};
use crate::core::pipeline::scoreboard::{Scoreboard, WriterTuple};
use crate::core::units::lsu::LocalStore;
use crate::core::units::{Completion, UnitId, UnitPipe};
use crate::stats::SimStats;

/// Anomalies the core absorbs silently but can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A non-zero word matched no opcode and ran as a no-op.
    UnrecognizedEncoding {
        /// Cycle it was issued in.
        cycle: u64,
        /// Instruction address.
        pc: u32,
        /// The word.
        raw: u32,
    },
    /// A completion lost a forward-queue priority select.
    DroppedWriter {
        /// Cycle it was dropped in.
        cycle: u64,
        /// The losing writer.
        writer: DroppedWriter,
    },
}

/// Main SPU structure containing all core state and components.
#[derive(Debug)]
pub struct Spu {
    /// Architectural register file.
    pub regs: RegisterFile,
    /// Data local store.
    pub local_store: LocalStore,
    /// Pair-organised instruction store.
    pub imem: InstructionStore,

    /// Fetch stage (PC, latch, pending redirect).
    pub fetch: InstructionFetch,
    /// Pair or lone instruction awaiting replay.
    pub retry: RetryBuffer,
    /// Issue state at the start of the next cycle.
    pub state: IssueState,
    /// Writer table rebuilt every cycle.
    pub scoreboard: Scoreboard,
    /// Dispatches of the previous cycle, scored as pseudo-writers.
    pub previous: Vec<WriterTuple>,

    /// Execution units with their delay lines, in `UnitId::ALL` order.
    pub pipes: Vec<UnitPipe>,
    /// Tier B forward queues.
    pub forward: ForwardNetwork,

    /// Enable per-stage tracing.
    pub trace: bool,
    /// Record diagnostics.
    pub record_diagnostics: bool,
    /// Performance statistics.
    pub stats: SimStats,
    /// Recorded diagnostics, oldest first.
    pub diagnostics: Vec<Diagnostic>,
    /// What the issue stage did last cycle.
    pub last_issue: IssueRecord,

    // Per-tick scratch, kept to avoid reallocating every cycle.
    completions: Vec<Completion>,
    dropped: Vec<DroppedWriter>,

    config: Config,
}

impl Spu {
    /// Creates a core in reset state from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(config.core.register_init),
            local_store: LocalStore::new(config.core.local_store_bytes),
            imem: InstructionStore::new(config.core.instruction_words),
            fetch: InstructionFetch::new(config.general.start_pc),
            retry: RetryBuffer::default(),
            state: IssueState::IdleAfterReset,
            scoreboard: Scoreboard::new(),
            previous: Vec::with_capacity(ISSUE_WIDTH),
            pipes: UnitId::ALL.iter().map(|&id| UnitPipe::new(id)).collect(),
            forward: ForwardNetwork::new(),
            trace: config.general.trace,
            record_diagnostics: config.general.diagnostics,
            stats: SimStats::default(),
            diagnostics: Vec::new(),
            last_issue: IssueRecord::default(),
            completions: Vec::with_capacity(UnitId::ALL.len()),
            dropped: Vec::new(),
            config: config.clone(),
        }
    }

    /// Returns the core to reset state.
    ///
    /// Clears delay lines, forward queues, the retry buffer, the fetch latch
    /// and the register file. The instruction store and local store keep
    /// their contents.
    pub fn reset(&mut self) {
        self.regs.reset(self.config.core.register_init);
        self.fetch.reset(self.config.general.start_pc);
        self.retry.clear();
        self.state = IssueState::IdleAfterReset;
        self.scoreboard.clear();
        self.previous.clear();
        self.pipes.iter_mut().for_each(UnitPipe::clear);
        self.forward.clear();
        self.stats = SimStats::default();
        self.diagnostics.clear();
        self.last_issue = IssueRecord::default();
        self.completions.clear();
        self.dropped.clear();
    }

    /// Loads `program` into the instruction store and resets the core.
    pub fn load_program(&mut self, program: &[u32]) -> SimResult<()> {
        self.imem.load(program)?;
        self.reset();
        Ok(())
    }

    /// Configuration the core was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Architectural value of register `addr`.
    pub fn register(&self, addr: u8) -> Quadword {
        self.regs.read(addr)
    }

    /// Whether the core has nothing left to do.
    ///
    /// Fetch has run past the loaded program, no replay is pending, and
    /// every delay line and forward queue is empty.
    pub fn is_drained(&self) -> bool {
        self.fetch.exhausted(self.imem.len())
            && self.retry.is_empty()
            && self.state != IssueState::BranchFlush
            && self.pipes.iter().all(|p| p.line().is_empty())
            && self.forward.is_idle()
    }
}
