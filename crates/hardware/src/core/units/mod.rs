//! Execution units and functional components.
//!
//! This module contains the seven execution units behind the issue lanes and
//! the plumbing shared by all of them. It provides:
//! 1. **Identity:** `UnitId`, each unit's issue lane and declared latency.
//! 2. **Contract:** The `ExecutionUnit` trait every unit implements.
//! 3. **Pipes:** `UnitPipe`, a unit plus the delay line that holds its in-flight writers.
//!
//! Units are black boxes to the control plane: a request goes in, and a
//! value with its write-enable comes out after the unit's fixed latency.

/// Branch unit and the stateless branch resolver.
pub mod bru;

/// Byte unit (count, average, absolute difference, sum).
pub mod byte;

/// Fixed-point units: simple (fixed-1) and shift/rotate (fixed-2).
pub mod fixed;

/// Single-precision unit: float arithmetic and integer multiply.
pub mod fpu;

/// Local store and the load/store unit.
pub mod lsu;

/// Permute unit (quadword shifts, rotates, shuffles, gathers).
pub mod permute;

use std::fmt;

use crate::common::Quadword;
use crate::core::pipeline::delay_line::{DelayLine, InFlight};
use crate::isa::opcodes::{self, Opcode};

use self::lsu::LocalStore;

/// One of the two issue lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    /// Arithmetic lane: fixed-point, byte and single-precision units.
    Even,
    /// Data-movement lane: permute, local-store and branch units.
    Odd,
}

impl Lane {
    /// Both lanes, even first.
    pub const ALL: [Self; 2] = [Self::Even, Self::Odd];

    /// Array index of the lane (even 0, odd 1).
    pub const fn index(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }

    /// The other lane.
    pub const fn other(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Even => "even",
            Self::Odd => "odd",
        })
    }
}

/// Identifies an execution unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitId {
    /// Simple fixed-point: add, logic, compare, immediate loads, select.
    Fixed1,
    /// Fixed-point shift and rotate.
    Fixed2,
    /// Byte operations.
    Byte,
    /// Single-precision float and integer multiply.
    SinglePrecision,
    /// Quadword permute.
    Permute,
    /// Local-store load and store.
    LocalStore,
    /// Branch and link.
    Branch,
}

impl UnitId {
    /// Every unit, even-lane units first.
    pub const ALL: [Self; 7] = [
        Self::Fixed1,
        Self::Fixed2,
        Self::Byte,
        Self::SinglePrecision,
        Self::Permute,
        Self::LocalStore,
        Self::Branch,
    ];

    /// Issue lane the unit hangs off.
    pub const fn lane(self) -> Lane {
        match self {
            Self::Fixed1 | Self::Fixed2 | Self::Byte | Self::SinglePrecision => Lane::Even,
            Self::Permute | Self::LocalStore | Self::Branch => Lane::Odd,
        }
    }

    /// Cycles from submit until the result enters the forward queue.
    ///
    /// Only the single-precision unit distinguishes integer results
    /// (multiply class, 6 cycles) from float results (5 cycles).
    pub const fn latency(self, is_integer: bool) -> usize {
        match self {
            Self::Fixed1 | Self::Branch => 1,
            Self::Fixed2 | Self::Byte | Self::Permute => 3,
            Self::LocalStore => 5,
            Self::SinglePrecision => {
                if is_integer {
                    6
                } else {
                    5
                }
            }
        }
    }

    /// Deepest latency the unit can produce; the depth of its delay line.
    pub const fn max_latency(self) -> usize {
        self.latency(true)
    }

    /// Array index of the unit, in `ALL` order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fixed1 => "fixed1",
            Self::Fixed2 => "fixed2",
            Self::Byte => "byte",
            Self::SinglePrecision => "sp",
            Self::Permute => "permute",
            Self::LocalStore => "ls",
            Self::Branch => "branch",
        })
    }
}

/// Everything a unit needs to execute one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitRequest {
    /// Operation to perform.
    pub op: Opcode,
    /// Destination register.
    pub dest: u8,
    /// Whether the result is written back.
    pub write: bool,
    /// Set when a taken branch ahead in program order cancelled this instruction.
    pub squashed: bool,
    /// Operand A (RA).
    pub a: Quadword,
    /// Operand B (RB).
    pub b: Quadword,
    /// Operand C (RC, or RT when read).
    pub c: Quadword,
    /// Decoded immediate.
    pub imm: i32,
    /// Instruction address, in words.
    pub pc: u32,
}

impl UnitRequest {
    /// Whether this request produces the integer-class result of its unit.
    pub const fn is_integer(&self) -> bool {
        opcodes::is_integer(self.op)
    }
}

/// Capability shared by every execution unit.
///
/// `execute` runs when the instruction is submitted; the pipe holds the
/// value back until the unit's latency has elapsed. Side effects on the
/// local store happen at submit, and a squashed request must have none.
pub trait ExecutionUnit: fmt::Debug {
    /// Which unit this is.
    fn id(&self) -> UnitId;

    /// Computes the result of `req`.
    fn execute(&mut self, req: &UnitRequest, local_store: &mut LocalStore) -> Quadword;
}

/// Builds the unit implementation for `id`.
pub fn build_unit(id: UnitId) -> Box<dyn ExecutionUnit> {
    match id {
        UnitId::Fixed1 => Box::new(fixed::FixedSimple),
        UnitId::Fixed2 => Box::new(fixed::FixedShift),
        UnitId::Byte => Box::new(byte::ByteUnit),
        UnitId::SinglePrecision => Box::new(fpu::SinglePrecision),
        UnitId::Permute => Box::new(permute::PermuteUnit),
        UnitId::LocalStore => Box::new(lsu::LoadStoreUnit),
        UnitId::Branch => Box::new(bru::BranchUnit),
    }
}

/// A result leaving a unit's final stage this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Unit that produced it.
    pub unit: UnitId,
    /// Whether it is the unit's integer-class result.
    pub is_integer: bool,
    /// Latency it completed at; selects the forward-queue slot.
    pub latency: usize,
    /// Destination register.
    pub dest: u8,
    /// Result value.
    pub value: Quadword,
    /// Write-enable at commit.
    pub write: bool,
}

/// An execution unit together with its in-flight writer records.
#[derive(Debug)]
pub struct UnitPipe {
    unit: Box<dyn ExecutionUnit>,
    line: DelayLine,
}

impl UnitPipe {
    /// Creates the pipe for `id` with an empty delay line.
    pub fn new(id: UnitId) -> Self {
        Self {
            unit: build_unit(id),
            line: DelayLine::new(id.max_latency()),
        }
    }

    /// Unit identity.
    pub fn id(&self) -> UnitId {
        self.unit.id()
    }

    /// Executes `req` and records it as in flight at age 0.
    pub fn submit(&mut self, req: &UnitRequest, local_store: &mut LocalStore) {
        let value = if req.squashed {
            Quadword::ZERO
        } else {
            self.unit.execute(req, local_store)
        };
        let is_integer = req.is_integer();
        self.line.insert(InFlight {
            dest: req.dest,
            write: req.write && !req.squashed,
            is_integer,
            latency: self.id().latency(is_integer),
            value,
        });
    }

    /// Ages every record by one cycle and reports those completing now.
    pub fn advance(&mut self, mut deliver: impl FnMut(Completion)) {
        let unit = self.id();
        self.line.advance(|record| {
            deliver(Completion {
                unit,
                is_integer: record.is_integer,
                latency: record.latency,
                dest: record.dest,
                value: record.value,
                write: record.write,
            });
        });
    }

    /// The unit's delay line.
    pub const fn line(&self) -> &DelayLine {
        &self.line
    }

    /// Drops every in-flight record.
    pub fn clear(&mut self) {
        self.line.clear();
    }
}
