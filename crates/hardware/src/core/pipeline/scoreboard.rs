//! Writer-tuple scoreboard for register dependency tracking.
//!
//! Rebuilt every cycle as a flat table of `(address, write_enable, depth,
//! unit, is_integer)` tuples: one per record in every unit's delay line,
//! plus the instructions dispatched in the previous cycle. The hazard
//! scorer runs one generic match scan over this table.

use crate::core::units::{UnitId, UnitPipe};

/// One potential writer of a register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterTuple {
    /// Destination register.
    pub addr: u8,
    /// Write-enable.
    pub write: bool,
    /// Cycles since submit (age in the delay line).
    pub depth: usize,
    /// Unit holding the record; `None` for a unit-less instruction.
    pub unit: Option<UnitId>,
    /// Integer-class result of a dual-latency unit.
    pub is_integer: bool,
    /// Previous-cycle dispatch kept visible for one extra cycle.
    pub pseudo: bool,
}

impl WriterTuple {
    /// Whether this writer's value is not yet available to a reader.
    ///
    /// Previous-cycle dispatches are always pending. A delay-line record is
    /// pending while its depth is below the latency of its result class.
    pub fn pending(&self) -> bool {
        if !self.write {
            return false;
        }
        if self.pseudo {
            return true;
        }
        self.unit
            .is_some_and(|unit| self.depth < unit.latency(self.is_integer))
    }
}

/// The per-cycle writer table.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    tuples: Vec<WriterTuple>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the table from the unit delay lines and last cycle's dispatches.
    pub fn rebuild(&mut self, pipes: &[UnitPipe], previous: &[WriterTuple]) {
        self.tuples.clear();
        for pipe in pipes {
            let unit = pipe.id();
            self.tuples
                .extend(pipe.line().iter().map(|(depth, record)| WriterTuple {
                    addr: record.dest,
                    write: record.write,
                    depth,
                    unit: Some(unit),
                    is_integer: record.is_integer,
                    pseudo: false,
                }));
        }
        self.tuples.extend(previous.iter().map(|t| WriterTuple {
            pseudo: true,
            ..*t
        }));
    }

    /// First pending writer of `addr`, if any.
    pub fn pending_writer(&self, addr: u8) -> Option<&WriterTuple> {
        self.tuples
            .iter()
            .find(|t| t.addr == addr && t.pending())
    }

    /// Drops every tuple.
    pub fn clear(&mut self) {
        self.tuples.clear();
    }
}
