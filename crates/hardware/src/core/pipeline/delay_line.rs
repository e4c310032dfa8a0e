//! Per-unit delay line of in-flight writer records.
//!
//! A ring buffer whose depth is the unit's maximum latency. A record enters
//! at age 0 when its instruction is submitted and ages by one every cycle.
//! When its age reaches its own latency the value is handed to the forward
//! network; the record itself stays in the ring, visible to the hazard
//! scorer, until its age reaches the ring depth and it is evicted.

use crate::common::Quadword;

/// One in-flight writer record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InFlight {
    /// Destination register.
    pub dest: u8,
    /// Write-enable at commit.
    pub write: bool,
    /// Integer-class result of a dual-latency unit.
    pub is_integer: bool,
    /// Cycles after submit at which the value completes.
    pub latency: usize,
    /// Result value, carried until completion.
    pub value: Quadword,
}

/// Ring buffer of in-flight writer records, indexed by age.
#[derive(Clone, Debug)]
pub struct DelayLine {
    slots: Box<[Option<InFlight>]>,
    head: usize,
}

impl DelayLine {
    /// Creates an empty line of `depth` slots.
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![None; depth.max(1)].into_boxed_slice(),
            head: 0,
        }
    }

    /// Number of slots (the unit's maximum latency).
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, age: usize) -> usize {
        (self.head + age) % self.slots.len()
    }

    /// Places a freshly submitted record at age 0.
    pub fn insert(&mut self, record: InFlight) {
        let idx = self.slot(0);
        self.slots[idx] = Some(record);
    }

    /// Ages every record by one cycle.
    ///
    /// Calls `complete` for each record whose age now equals its latency.
    /// The record that reaches the ring depth is evicted.
    pub fn advance(&mut self, mut complete: impl FnMut(&InFlight)) {
        let depth = self.slots.len();
        self.head = (self.head + depth - 1) % depth;
        // The slot that became age 0 held the record now reaching `depth`.
        if let Some(evicted) = self.slots[self.head].take()
            && evicted.latency == depth
        {
            complete(&evicted);
        }
        for age in 1..depth {
            let idx = self.slot(age);
            if let Some(record) = &self.slots[idx]
                && record.latency == age
            {
                complete(record);
            }
        }
    }

    /// Iterates `(age, record)` over every live record, youngest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &InFlight)> + '_ {
        (0..self.slots.len()).filter_map(move |age| {
            self.slots[self.slot(age)]
                .as_ref()
                .map(|record| (age, record))
        })
    }

    /// Whether no record is in flight.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
    }
}
