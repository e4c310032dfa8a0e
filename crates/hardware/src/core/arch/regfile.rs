//! SIMD Register File.
//!
//! This module implements the 128-entry quadword register file. It performs the following:
//! 1. **Storage:** Maintains 128 registers of 128 bits each.
//! 2. **Commit:** Accepts at most two writes per cycle, one per issue lane.
//! 3. **Tier A Bypass:** Reads issued in the cycle of a commit observe the
//!    committing value, with the odd lane's port winning when both match.

use crate::common::{Quadword, REGISTER_COUNT};
use crate::config::RegisterInit;
use crate::core::units::Lane;

/// A pending register write: forward-queue entry or commit port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register.
    pub addr: u8,
    /// Value to write.
    pub value: Quadword,
    /// Write-enable; a disabled entry carries nothing.
    pub write: bool,
}

impl RegWrite {
    /// An empty slot.
    pub const IDLE: Self = Self {
        addr: 0,
        value: Quadword::ZERO,
        write: false,
    };

    /// Whether this entry writes `addr`.
    pub const fn hits(&self, addr: u8) -> bool {
        self.write && self.addr == addr
    }
}

/// The two commit ports of one cycle, indexed by lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitPorts {
    /// Even-lane port.
    pub even: RegWrite,
    /// Odd-lane port.
    pub odd: RegWrite,
}

impl CommitPorts {
    /// No writes this cycle.
    pub const IDLE: Self = Self {
        even: RegWrite::IDLE,
        odd: RegWrite::IDLE,
    };

    /// The port of `lane`.
    pub const fn port(&self, lane: Lane) -> &RegWrite {
        match lane {
            Lane::Even => &self.even,
            Lane::Odd => &self.odd,
        }
    }

    /// Value committing to `addr` this cycle, odd port first.
    pub fn bypass(&self, addr: u8) -> Option<Quadword> {
        [self.odd, self.even]
            .iter()
            .find(|port| port.hits(addr))
            .map(|port| port.value)
    }
}

/// The architectural register file.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: Box<[Quadword; REGISTER_COUNT]>,
}

impl RegisterFile {
    /// Creates a register file holding the `init` reset pattern.
    pub fn new(init: RegisterInit) -> Self {
        let mut rf = Self {
            regs: Box::new([Quadword::ZERO; REGISTER_COUNT]),
        };
        rf.reset(init);
        rf
    }

    /// Restores the `init` reset pattern.
    pub fn reset(&mut self, init: RegisterInit) {
        for (i, reg) in self.regs.iter_mut().enumerate() {
            *reg = match init {
                RegisterInit::Zero => Quadword::ZERO,
                RegisterInit::Indexed => Quadword::splat_word(i as u32),
            };
        }
    }

    /// Reads the stored value of `addr`, ignoring this cycle's commits.
    pub fn read(&self, addr: u8) -> Quadword {
        self.regs[usize::from(addr) % REGISTER_COUNT]
    }

    /// Reads `addr` through the Tier A bypass.
    ///
    /// Returns the value and whether a commit port supplied it.
    pub fn read_bypassed(&self, addr: u8, ports: &CommitPorts) -> (Quadword, bool) {
        match ports.bypass(addr) {
            Some(value) => (value, true),
            None => (self.read(addr), false),
        }
    }

    /// Writes `value` to `addr` directly.
    pub fn write(&mut self, addr: u8, value: Quadword) {
        self.regs[usize::from(addr) % REGISTER_COUNT] = value;
    }

    /// Applies both commit ports, even first so the odd port wins a tie.
    pub fn commit(&mut self, ports: &CommitPorts) {
        for port in [ports.even, ports.odd] {
            if port.write {
                self.write(port.addr, port.value);
            }
        }
    }
}
