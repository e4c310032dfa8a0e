//! Instruction Fetch.
//!
//! This module implements the front of the pipeline. It provides:
//! 1. **Instruction Store:** A flat word store organised in even/odd pair rows.
//! 2. **Pair Delivery:** Every cycle two sequential words `(pc, pc + 1)` enter
//!    the fetch latch, read from one row when `pc` is even (`Aligned`) or from
//!    the odd half of one row and the even half of the next (`Straddle`).
//! 3. **Control:** Hold on stall, discard-and-refill on a branch redirect,
//!    otherwise advance by two.
//!
//! Reads past the end of the store yield the all-zero no-op.

use tracing::trace;

use crate::common::constants::{ISSUE_WIDTH, NOP_WORD};
use crate::common::error::{SimError, SimResult};
use crate::core::pipeline::latches::{FetchPair, FetchSlot, Refill};

/// Pair-organised instruction store.
#[derive(Clone, Debug)]
pub struct InstructionStore {
    rows: Vec<[u32; ISSUE_WIDTH]>,
    len: usize,
}

impl InstructionStore {
    /// Creates a zeroed store of at least `capacity` words.
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: vec![[NOP_WORD; ISSUE_WIDTH]; capacity.div_ceil(ISSUE_WIDTH)],
            len: 0,
        }
    }

    /// Capacity in words.
    pub fn capacity(&self) -> usize {
        self.rows.len() * ISSUE_WIDTH
    }

    /// Number of words loaded by the last `load`.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no program is loaded.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replaces the store contents with `program`, starting at address 0.
    pub fn load(&mut self, program: &[u32]) -> SimResult<()> {
        if program.len() > self.capacity() {
            return Err(SimError::ProgramTooLarge {
                words: program.len(),
                capacity: self.capacity(),
            });
        }
        self.rows.iter_mut().for_each(|row| *row = [NOP_WORD; ISSUE_WIDTH]);
        for (addr, &word) in program.iter().enumerate() {
            self.rows[addr / ISSUE_WIDTH][addr % ISSUE_WIDTH] = word;
        }
        self.len = program.len();
        Ok(())
    }

    /// Word at `addr`; zero past the end.
    pub fn word(&self, addr: u32) -> u32 {
        let addr = addr as usize;
        self.rows
            .get(addr / ISSUE_WIDTH)
            .map_or(NOP_WORD, |row| row[addr % ISSUE_WIDTH])
    }

    /// The pair `(pc, pc + 1)`.
    pub fn pair(&self, pc: u32) -> FetchPair {
        let next = pc.wrapping_add(1);
        FetchPair {
            first: FetchSlot {
                pc,
                raw: self.word(pc),
            },
            second: Some(FetchSlot {
                pc: next,
                raw: self.word(next),
            }),
            refill: if pc % 2 == 0 {
                Refill::Aligned
            } else {
                Refill::Straddle
            },
        }
    }
}

/// Fetch stage state: next PC, latch and pending redirect.
#[derive(Clone, Debug, Default)]
pub struct InstructionFetch {
    pc: u32,
    latch: Option<FetchPair>,
    redirect: Option<u32>,
}

impl InstructionFetch {
    /// Creates an empty fetch stage starting at `pc`.
    pub fn new(pc: u32) -> Self {
        Self {
            pc,
            latch: None,
            redirect: None,
        }
    }

    /// Next address to fetch.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// The pair delivered last cycle.
    pub const fn latch(&self) -> Option<&FetchPair> {
        self.latch.as_ref()
    }

    /// Records a taken-branch target; applied by the next `step`.
    pub fn redirect(&mut self, target: u32) {
        self.redirect = Some(target);
    }

    /// Runs the fetch step of one cycle.
    ///
    /// A pending redirect wins over `hold` and refills the latch from its
    /// target. Otherwise `hold` keeps PC and latch, and a free cycle loads
    /// the next pair and advances by two.
    pub fn step(&mut self, store: &InstructionStore, hold: bool) {
        if let Some(target) = self.redirect.take() {
            trace!(target, "fetch: redirect");
            self.pc = target;
        } else if hold {
            trace!(pc = self.pc, "fetch: hold");
            return;
        }
        let pair = store.pair(self.pc);
        trace!(pc = self.pc, refill = ?pair.refill, "fetch: pair");
        self.latch = Some(pair);
        self.pc = self.pc.wrapping_add(ISSUE_WIDTH as u32);
    }

    /// Whether the latch and PC have both moved past `end`.
    pub fn exhausted(&self, end: usize) -> bool {
        let end = end as u64;
        self.redirect.is_none()
            && u64::from(self.pc) >= end
            && self
                .latch
                .is_none_or(|pair| u64::from(pair.first.pc) >= end)
    }

    /// Returns to reset state at `pc`.
    pub fn reset(&mut self, pc: u32) {
        *self = Self::new(pc);
    }
}
