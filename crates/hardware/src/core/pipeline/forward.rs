//! Tier B Forward Network.
//!
//! This module implements the pipelined bypass queues. It provides:
//! 1. **Queues:** One 7-deep shift register per issue lane. Entries move one
//!    slot toward index 0 every cycle, and the entry leaving index 0 becomes
//!    that lane's commit port.
//! 2. **Write-in:** A result from a unit of latency `L` enters at index `6 - L`.
//!    Every instruction therefore commits exactly seven cycles after issue,
//!    whichever unit ran it, and a higher index always holds a younger writer.
//! 3. **Priority Select:** When several completions target the same slot of one
//!    lane, a fixed unit priority keeps one and the rest are dropped and reported.
//! 4. **Lookup:** Operand reads scan index 6 down to 0, odd lane first at each
//!    index; the first enabled entry for the address wins.

use tracing::warn;

use crate::common::constants::{FORWARD_DEPTH, FORWARD_TAIL};
use crate::common::Quadword;
use crate::core::arch::regfile::{CommitPorts, RegWrite};
use crate::core::units::{Completion, Lane, UnitId};

/// Rank of a completing unit in its lane's priority select (lower wins).
///
/// Odd lane: local store, permute, branch. Even lane: single-precision
/// integer, single-precision float, fixed-2, byte, fixed-1.
pub const fn priority(unit: UnitId, is_integer: bool) -> u8 {
    match unit {
        UnitId::LocalStore => 0,
        UnitId::Permute => 1,
        UnitId::Branch => 2,
        UnitId::SinglePrecision => {
            if is_integer {
                0
            } else {
                1
            }
        }
        UnitId::Fixed2 => 2,
        UnitId::Byte => 3,
        UnitId::Fixed1 => 4,
    }
}

/// A completion that lost the priority select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DroppedWriter {
    /// Lane whose queue was contended.
    pub lane: Lane,
    /// Queue slot both writers targeted.
    pub slot: usize,
    /// The losing completion.
    pub completion: Completion,
}

/// One lane's bypass queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardQueue {
    entries: [RegWrite; FORWARD_DEPTH],
}

impl ForwardQueue {
    /// Shifts every entry one slot toward the head.
    ///
    /// Returns the entry that left index 0.
    pub fn shift(&mut self) -> RegWrite {
        let head = self.entries[0];
        self.entries.copy_within(1.., 0);
        self.entries[FORWARD_TAIL] = RegWrite::IDLE;
        head
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> RegWrite {
        self.entries[index]
    }

    /// Overwrites the entry at `index`.
    pub fn set(&mut self, index: usize, entry: RegWrite) {
        self.entries[index] = entry;
    }

    /// Whether no entry carries a write.
    pub fn is_idle(&self) -> bool {
        self.entries.iter().all(|e| !e.write)
    }
}

/// The pair of per-lane bypass queues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardNetwork {
    queues: [ForwardQueue; 2],
}

impl ForwardNetwork {
    /// Creates empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue of `lane`.
    pub const fn queue(&self, lane: Lane) -> &ForwardQueue {
        &self.queues[lane.index()]
    }

    /// Shifts both queues and returns the entries leaving them as this
    /// cycle's commit ports.
    pub fn shift(&mut self) -> CommitPorts {
        CommitPorts {
            even: self.queues[Lane::Even.index()].shift(),
            odd: self.queues[Lane::Odd.index()].shift(),
        }
    }

    /// Writes this cycle's completions into their queue slots.
    ///
    /// Completions without a write-enable carry nothing and are skipped.
    /// The rest are grouped by lane and slot; in each group the highest
    /// priority unit is written and the others are left in `dropped`,
    /// which is cleared first so the caller can reuse one buffer.
    pub fn write_in(&mut self, completions: &[Completion], dropped: &mut Vec<DroppedWriter>) {
        dropped.clear();
        let mut winners: [[Option<Completion>; FORWARD_DEPTH]; 2] = [[None; FORWARD_DEPTH]; 2];

        for c in completions.iter().filter(|c| c.write) {
            let lane = c.unit.lane();
            let slot = FORWARD_TAIL.saturating_sub(c.latency);
            let cell = &mut winners[lane.index()][slot];
            match *cell {
                Some(current)
                    if priority(current.unit, current.is_integer)
                        <= priority(c.unit, c.is_integer) =>
                {
                    dropped.push(DroppedWriter {
                        lane,
                        slot,
                        completion: *c,
                    });
                }
                Some(current) => {
                    dropped.push(DroppedWriter {
                        lane,
                        slot,
                        completion: current,
                    });
                    *cell = Some(*c);
                }
                None => *cell = Some(*c),
            }
        }

        for lane in Lane::ALL {
            for (slot, winner) in winners[lane.index()].iter().enumerate() {
                if let Some(c) = winner {
                    self.queues[lane.index()].set(
                        slot,
                        RegWrite {
                            addr: c.dest,
                            value: c.value,
                            write: c.write,
                        },
                    );
                }
            }
        }

        for d in dropped.iter() {
            warn!(
                lane = %d.lane,
                slot = d.slot,
                unit = %d.completion.unit,
                dest = d.completion.dest,
                "forward write-in contention, lower priority writer dropped"
            );
        }
    }

    /// Tier B lookup of `addr`.
    ///
    /// Returns the value of the youngest enabled entry for the address.
    pub fn lookup(&self, addr: u8) -> Option<Quadword> {
        (0..FORWARD_DEPTH).rev().find_map(|index| {
            [Lane::Odd, Lane::Even]
                .iter()
                .map(|&lane| self.queues[lane.index()].get(index))
                .find(|entry| entry.hits(addr))
                .map(|entry| entry.value)
        })
    }

    /// Whether both queues are empty of writes.
    pub fn is_idle(&self) -> bool {
        self.queues.iter().all(ForwardQueue::is_idle)
    }

    /// Empties both queues.
    pub fn clear(&mut self) {
        self.queues = [ForwardQueue::default(); 2];
    }
}
