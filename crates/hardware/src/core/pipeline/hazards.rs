//! Dual-Issue Hazard Scoring.
//!
//! This module decides, once per cycle, which instructions of the presented
//! pair may issue. It provides:
//! 1. **Issue State:** The four-state issue machine (idle after reset, normal,
//!    stalled replay, branch flush).
//! 2. **First Stall:** Any valid source of the first instruction has a pending writer.
//! 3. **Second Stall:** The same scan for the second instruction, plus RAW
//!    against the first's destination, a structural conflict when both need
//!    the same issue lane, and WAW when both write the same destination.
//!
//! Resolution: a first stall holds the whole pair; a second stall issues the
//! first and holds the second alone; otherwise both issue.

use std::fmt;

use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::units::{Lane, UnitId};
use crate::isa::instruction::Decoded;

/// State of the issue stage at the start of a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IssueState {
    /// First cycle after reset: both lanes are no-ops.
    #[default]
    IdleAfterReset,
    /// Decoding the fetch latch.
    Normal,
    /// Decoding the retry buffer.
    StalledReplay,
    /// Discarding the wrong-path pair after a taken branch.
    BranchFlush,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IdleAfterReset => "idle",
            Self::Normal => "normal",
            Self::StalledReplay => "replay",
            Self::BranchFlush => "flush",
        })
    }
}

/// Why an instruction could not issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// A source register has an in-flight writer whose value is not ready.
    Pending {
        /// Register read.
        addr: u8,
        /// Unit holding the writer; `None` for a unit-less instruction.
        unit: Option<UnitId>,
    },
    /// The second instruction reads the first instruction's destination.
    SiblingRaw {
        /// Register read.
        addr: u8,
    },
    /// Both instructions need the same issue lane.
    Structural {
        /// Contended lane.
        lane: Lane,
    },
    /// Both instructions write the same destination.
    Waw {
        /// Register written twice.
        addr: u8,
    },
}

/// The scorer's decision for one pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    /// Set when the first instruction (and so the pair) must wait.
    pub first_stall: Option<StallCause>,
    /// Set when the second instruction must wait.
    pub second_stall: Option<StallCause>,
}

impl Verdict {
    /// Whether Fetch must hold its PC.
    pub const fn stalls_fetch(&self) -> bool {
        self.first_stall.is_some() || self.second_stall.is_some()
    }
}

/// Finds a pending writer of any valid source of `d`.
pub fn source_hazard(board: &Scoreboard, d: &Decoded) -> Option<StallCause> {
    d.sources()
        .iter()
        .filter(|s| s.valid)
        .find_map(|s| {
            board.pending_writer(s.addr).map(|t| StallCause::Pending {
                addr: s.addr,
                unit: t.unit,
            })
        })
}

/// Hazards between the two instructions of one pair.
pub fn pair_hazard(first: &Decoded, second: &Decoded) -> Option<StallCause> {
    if let Some(dest) = first.writes()
        && second.reads(dest)
    {
        return Some(StallCause::SiblingRaw { addr: dest });
    }
    if let (Some(a), Some(b)) = (first.lane, second.lane)
        && a == b
    {
        return Some(StallCause::Structural { lane: a });
    }
    if let (Some(a), Some(b)) = (first.writes(), second.writes())
        && a == b
    {
        return Some(StallCause::Waw { addr: a });
    }
    None
}

/// Scores a presented pair against the writer table.
pub fn score(board: &Scoreboard, first: &Decoded, second: Option<&Decoded>) -> Verdict {
    let first_stall = source_hazard(board, first);
    let second_stall = second.and_then(|second| {
        source_hazard(board, second).or_else(|| pair_hazard(first, second))
    });
    Verdict {
        first_stall,
        second_stall,
    }
}
