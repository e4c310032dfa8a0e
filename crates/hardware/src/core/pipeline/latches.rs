//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between Fetch, Decode and Issue:
//! 1. **Fetch Latch:** The instruction pair delivered by Fetch for the next cycle.
//! 2. **Retry Buffer:** The pair (or lone second instruction) held back by a stall.
//! 3. **Issue Record:** What Decode did with the pair this cycle, for tracing and tests.

use crate::core::pipeline::hazards::{IssueState, StallCause};
use crate::core::units::Lane;
use crate::isa::instruction::Decoded;

/// One fetched instruction and its address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSlot {
    /// Instruction address, in words.
    pub pc: u32,
    /// Raw instruction word.
    pub raw: u32,
}

/// How a fetch pair was read from the pair-organised store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Refill {
    /// Both slots from one even/odd row.
    #[default]
    Aligned,
    /// Odd half of one row plus even half of the next.
    Straddle,
}

/// Two sequential instructions in program order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchPair {
    /// Program-order-first instruction.
    pub first: FetchSlot,
    /// Program-order-second instruction; absent when a lone instruction replays.
    pub second: Option<FetchSlot>,
    /// Row access used to read the pair.
    pub refill: Refill,
}

impl FetchPair {
    /// A pair holding only `slot`.
    pub const fn single(slot: FetchSlot) -> Self {
        Self {
            first: slot,
            second: None,
            refill: Refill::Aligned,
        }
    }
}

/// Decode-side buffer of instructions waiting to be re-presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryBuffer {
    pair: Option<FetchPair>,
}

impl RetryBuffer {
    /// Buffers `pair` for the next cycle.
    pub fn hold(&mut self, pair: FetchPair) {
        self.pair = Some(pair);
    }

    /// Takes the buffered pair, leaving the buffer empty.
    pub fn take(&mut self) -> Option<FetchPair> {
        self.pair.take()
    }

    /// Whether anything is waiting.
    pub const fn is_empty(&self) -> bool {
        self.pair.is_none()
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.pair = None;
    }
}

/// Which issue lane holds the program-order-first instruction of a pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchOrder {
    /// The even lane holds the first instruction.
    #[default]
    EvenFirst,
    /// The odd lane holds the first instruction.
    OddFirst,
}

impl BranchOrder {
    /// Tag for a pair whose first instruction went to `lane`.
    pub const fn from_first_lane(lane: Lane) -> Self {
        match lane {
            Lane::Even => Self::EvenFirst,
            Lane::Odd => Self::OddFirst,
        }
    }
}

/// What happened to one instruction at issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotFate {
    /// Dispatched to its unit.
    Issued,
    /// Dispatched with its write disabled behind a taken branch.
    Squashed,
    /// Held in the retry buffer.
    Stalled(StallCause),
}

/// One decoded instruction of an issue record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueSlot {
    /// Instruction address.
    pub pc: u32,
    /// Decoded descriptor.
    pub decoded: Decoded,
    /// Issue lane used.
    pub lane: Lane,
    /// Outcome.
    pub fate: SlotFate,
}

/// Per-cycle record of the decode/issue stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssueRecord {
    /// Cycle number.
    pub cycle: u64,
    /// State the stage was in at the start of the cycle.
    pub state: IssueState,
    /// Program-order-first instruction, if any was presented.
    pub first: Option<IssueSlot>,
    /// Program-order-second instruction, if any was presented.
    pub second: Option<IssueSlot>,
    /// Lane of the program-order-first instruction.
    pub order: BranchOrder,
    /// Taken-branch target resolved this cycle.
    pub redirect: Option<u32>,
}

impl IssueRecord {
    /// Number of instructions dispatched (squashed ones included).
    pub fn dispatched(&self) -> usize {
        [self.first, self.second]
            .iter()
            .flatten()
            .filter(|s| !matches!(s.fate, SlotFate::Stalled(_)))
            .count()
    }

    /// Whether any instruction was held back.
    pub fn stalled(&self) -> bool {
        [self.first, self.second]
            .iter()
            .flatten()
            .any(|s| matches!(s.fate, SlotFate::Stalled(_)))
    }
}
