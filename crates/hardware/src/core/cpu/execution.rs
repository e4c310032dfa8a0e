//! Main Execution Loop.
//!
//! This module implements the clock edge of the core. One `tick` performs, in order:
//! 1. **Commit Pop:** Both forward queues shift; the entries leaving index 0
//!    become this cycle's commit ports.
//! 2. **Write-in:** Every unit pipe ages by one cycle and its completions are
//!    priority-selected into the queues.
//! 3. **Issue:** The presented pair is decoded and scored; survivors read their
//!    operands (Tier B, then the Tier A corrected register value), branches
//!    resolve, and the instructions are submitted to their units.
//! 4. **Fetch:** Hold, apply last cycle's redirect, or advance. A branch
//!    resolved this cycle redirects Fetch on the following cycle, so the pair
//!    latched now is the wrong-path pair the flush cycle discards.
//! 5. **Commit:** The commit ports are written to the register file.

use tracing::{debug, trace};

use super::{Diagnostic, Spu};
use crate::common::constants::ISSUE_WIDTH;
use crate::common::Quadword;
use crate::core::arch::regfile::CommitPorts;
use crate::core::pipeline::hazards::{self, IssueState, Verdict};
use crate::core::pipeline::latches::{
    BranchOrder, FetchPair, FetchSlot, IssueRecord, IssueSlot, SlotFate,
};
use crate::core::pipeline::scoreboard::WriterTuple;
use crate::core::units::bru::{self, BranchOutcome};
use crate::core::units::{Lane, UnitRequest};
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, Operand};
use crate::isa::opcodes::Opcode;

impl Spu {
    /// Advances the core by one clock cycle.
    pub fn tick(&mut self) {
        let cycle = self.stats.cycles;

        let ports = self.forward.shift();

        self.completions.clear();
        let completions = &mut self.completions;
        for pipe in &mut self.pipes {
            pipe.advance(|c| completions.push(c));
        }
        self.forward.write_in(&self.completions, &mut self.dropped);
        self.record_drops(cycle);

        self.scoreboard.rebuild(&self.pipes, &self.previous);
        let hold = self.issue(cycle, &ports);

        self.fetch.step(&self.imem, hold);
        if let Some(target) = self.last_issue.redirect {
            self.fetch.redirect(target);
        }

        if self.trace {
            for lane in Lane::ALL {
                let port = ports.port(lane);
                if port.write {
                    trace!(cycle, %lane, dest = port.addr, value = %port.value, "commit");
                }
            }
        }
        self.regs.commit(&ports);
        self.stats.cycles += 1;
    }

    /// Runs the decode/score/issue step; returns whether Fetch must hold.
    fn issue(&mut self, cycle: u64, ports: &CommitPorts) -> bool {
        let state = self.state;
        let mut record = IssueRecord {
            cycle,
            state,
            ..IssueRecord::default()
        };
        let mut dispatched = std::mem::take(&mut self.previous);
        dispatched.clear();

        let pair = match state {
            IssueState::IdleAfterReset => None,
            IssueState::BranchFlush => {
                self.stats.flush_cycles += 1;
                if self.trace {
                    debug!(cycle, "issue: flushing wrong-path pair");
                }
                None
            }
            IssueState::StalledReplay => self.retry.take(),
            IssueState::Normal => self.fetch.latch().copied(),
        };
        self.state = IssueState::Normal;

        let hold = match pair {
            Some(pair) => self.issue_pair(pair, ports, &mut record, &mut dispatched),
            None => false,
        };

        self.previous = dispatched;
        self.last_issue = record;
        hold
    }

    /// Scores and dispatches one presented pair.
    fn issue_pair(
        &mut self,
        pair: FetchPair,
        ports: &CommitPorts,
        record: &mut IssueRecord,
        dispatched: &mut Vec<WriterTuple>,
    ) -> bool {
        let first = decode(pair.first.raw);
        let second = pair.second.map(|slot| (slot, decode(slot.raw)));

        let first_lane = first
            .lane
            .or_else(|| second.and_then(|(_, d)| d.lane).map(Lane::other))
            .unwrap_or(Lane::Even);
        let second_lane = first_lane.other();
        record.order = BranchOrder::from_first_lane(first_lane);

        let verdict = hazards::score(&self.scoreboard, &first, second.as_ref().map(|(_, d)| d));

        if let Some(cause) = verdict.first_stall {
            self.stats.first_stalls += 1;
            if self.trace {
                debug!(cycle = record.cycle, pc = pair.first.pc, ?cause, "issue: pair stalled");
            }
            record.first = Some(slot_record(pair.first, first, first_lane, SlotFate::Stalled(cause)));
            record.second = second.map(|(slot, d)| {
                let held = verdict.second_stall.unwrap_or(cause);
                slot_record(slot, d, second_lane, SlotFate::Stalled(held))
            });
            self.retry.hold(pair);
            self.state = IssueState::StalledReplay;
            return true;
        }

        let outcome = self.dispatch(pair.first, &first, false, true, ports, dispatched);
        record.first = Some(slot_record(pair.first, first, first_lane, SlotFate::Issued));
        let mut redirect = outcome.filter(|o| o.taken).map(|o| o.target);
        let squash = outcome.is_some_and(|o| o.squash_sibling);
        let hold = verdict.stalls_fetch() && !squash;

        if let Some((slot, d)) = second {
            let fate = self.issue_second(slot, &d, squash, verdict, ports, dispatched, &mut redirect);
            record.second = Some(slot_record(slot, d, second_lane, fate));
        }

        if dispatched.len() == ISSUE_WIDTH {
            self.stats.dual_issue_cycles += 1;
        }

        if let Some(target) = redirect {
            self.stats.taken_branches += 1;
            self.state = IssueState::BranchFlush;
            record.redirect = Some(target);
            if self.trace {
                debug!(cycle = record.cycle, target, squash, "issue: taken branch");
            }
        }
        hold
    }

    /// Handles the program-order-second instruction once the first issued.
    #[allow(clippy::too_many_arguments)]
    fn issue_second(
        &mut self,
        slot: FetchSlot,
        d: &Decoded,
        squash: bool,
        verdict: Verdict,
        ports: &CommitPorts,
        dispatched: &mut Vec<WriterTuple>,
        redirect: &mut Option<u32>,
    ) -> SlotFate {
        if squash {
            let _ = self.dispatch(slot, d, true, false, ports, dispatched);
            self.stats.squashes += 1;
            return SlotFate::Squashed;
        }
        if let Some(cause) = verdict.second_stall {
            self.stats.second_stalls += 1;
            if self.trace {
                debug!(pc = slot.pc, ?cause, "issue: second instruction stalled");
            }
            self.retry.hold(FetchPair::single(slot));
            self.state = IssueState::StalledReplay;
            return SlotFate::Stalled(cause);
        }
        if let Some(o) = self.dispatch(slot, d, false, false, ports, dispatched)
            && o.taken
        {
            *redirect = Some(o.target);
        }
        SlotFate::Issued
    }

    /// Reads operands, resolves branches and submits one instruction.
    ///
    /// A squashed instruction reaches its unit with write disabled and no
    /// operands; it is neither resolved nor scored as a writer.
    fn dispatch(
        &mut self,
        slot: FetchSlot,
        d: &Decoded,
        squashed: bool,
        first_in_pair: bool,
        ports: &CommitPorts,
        dispatched: &mut Vec<WriterTuple>,
    ) -> Option<BranchOutcome> {
        if d.op == Opcode::Unknown && !squashed {
            self.note_unrecognized(slot);
        }
        let unit = d.unit?;

        let (a, b, c) = if squashed {
            (Quadword::ZERO, Quadword::ZERO, Quadword::ZERO)
        } else {
            (
                self.read_operand(d.a, ports),
                self.read_operand(d.b, ports),
                self.read_operand(d.c, ports),
            )
        };

        let outcome = (!squashed && d.is_branch())
            .then(|| bru::resolve(d, a, c, slot.pc, first_in_pair));

        let req = UnitRequest {
            op: d.op,
            dest: d.dest,
            write: d.write && !squashed,
            squashed,
            a,
            b,
            c,
            imm: d.imm,
            pc: slot.pc,
        };
        self.pipes[unit.index()].submit(&req, &mut self.local_store);

        if self.trace {
            trace!(pc = slot.pc, %unit, squashed, inst = %d, "issue");
        }
        if !squashed {
            self.stats.instructions_issued += 1;
            dispatched.push(WriterTuple {
                addr: d.dest,
                write: d.write,
                depth: 0,
                unit: Some(unit),
                is_integer: req.is_integer(),
                pseudo: true,
            });
        }
        outcome
    }

    /// Operand value: youngest forward-queue entry, else the register file
    /// corrected by this cycle's commit ports.
    fn read_operand(&mut self, op: Operand, ports: &CommitPorts) -> Quadword {
        if !op.valid {
            return Quadword::ZERO;
        }
        if let Some(value) = self.forward.lookup(op.addr) {
            self.stats.tier_b_forwards += 1;
            return value;
        }
        let (value, bypassed) = self.regs.read_bypassed(op.addr, ports);
        if bypassed {
            self.stats.tier_a_forwards += 1;
        }
        value
    }

    fn note_unrecognized(&mut self, slot: FetchSlot) {
        self.stats.unrecognized += 1;
        if self.trace {
            debug!(pc = slot.pc, raw = slot.raw, "issue: unrecognised encoding ran as no-op");
        }
        if self.record_diagnostics {
            self.diagnostics.push(Diagnostic::UnrecognizedEncoding {
                cycle: self.stats.cycles,
                pc: slot.pc,
                raw: slot.raw,
            });
        }
    }

    fn record_drops(&mut self, cycle: u64) {
        self.stats.dropped_writers += self.dropped.len() as u64;
        if self.record_diagnostics {
            self.diagnostics.extend(
                self.dropped
                    .iter()
                    .map(|&writer| Diagnostic::DroppedWriter { cycle, writer }),
            );
        }
    }
}

const fn slot_record(slot: FetchSlot, decoded: Decoded, lane: Lane, fate: SlotFate) -> IssueSlot {
    IssueSlot {
        pc: slot.pc,
        decoded,
        lane,
        fate,
    }
}
