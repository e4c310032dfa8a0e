//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the SPU core model. It provides:
//! 1. **Cycle and IPC:** Total cycles, issued instructions and dual-issue cycles.
//! 2. **Stalls:** First-instruction and second-instruction stalls.
//! 3. **Control:** Taken branches, squashed siblings and flush cycles.
//! 4. **Forwarding:** Operands supplied by Tier A and Tier B, dropped writers.
//!
//! Statistics serialise to JSON through `serde` and render as a plain-text
//! report through `Display` or `report_sections`.

use std::fmt::{self, Write as _};

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions dispatched to a unit (squashed ones excluded).
    pub instructions_issued: u64,
    /// Cycles in which both lanes dispatched.
    pub dual_issue_cycles: u64,

    /// Cycles in which the whole pair was held.
    pub first_stalls: u64,
    /// Cycles in which only the second instruction was held.
    pub second_stalls: u64,

    /// Taken branches resolved at issue.
    pub taken_branches: u64,
    /// Second instructions cancelled behind a taken branch.
    pub squashes: u64,
    /// Cycles spent discarding the wrong-path pair.
    pub flush_cycles: u64,

    /// Operands supplied by a same-cycle commit port.
    pub tier_a_forwards: u64,
    /// Operands supplied by a forward queue.
    pub tier_b_forwards: u64,
    /// Completions dropped by a forward-queue priority select.
    pub dropped_writers: u64,

    /// Non-zero words that matched no opcode and ran as no-ops.
    pub unrecognized: u64,
}

/// Section names for selective report output.
///
/// Pass an empty slice to `report_sections` to render every section.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "control", "forwarding"];

impl SimStats {
    /// Instructions issued per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_issued as f64 / self.cycles.max(1) as f64
    }

    /// Serialises the counters as a JSON object.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Renders only the requested sections.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"stalls"`,
    /// `"control"` or `"forwarding"`.
    pub fn report_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        let mut out = String::new();
        let rule = "----------------------------------------------------------";

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "SPU CORE SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_issued);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(
                out,
                "dual_issue               {} ({:.2}%)",
                self.dual_issue_cycles,
                pct(self.dual_issue_cycles)
            );
            let _ = writeln!(out, "unrecognized             {}", self.unrecognized);
            let _ = writeln!(out, "{rule}");
        }
        if want("stalls") {
            let _ = writeln!(out, "STALLS");
            let _ = writeln!(
                out,
                "  stalls.pair            {} ({:.2}%)",
                self.first_stalls,
                pct(self.first_stalls)
            );
            let _ = writeln!(
                out,
                "  stalls.second          {} ({:.2}%)",
                self.second_stalls,
                pct(self.second_stalls)
            );
            let _ = writeln!(out, "{rule}");
        }
        if want("control") {
            let _ = writeln!(out, "CONTROL");
            let _ = writeln!(out, "  branch.taken           {}", self.taken_branches);
            let _ = writeln!(out, "  branch.squashes        {}", self.squashes);
            let _ = writeln!(
                out,
                "  branch.flush           {} ({:.2}%)",
                self.flush_cycles,
                pct(self.flush_cycles)
            );
            let _ = writeln!(out, "{rule}");
        }
        if want("forwarding") {
            let _ = writeln!(out, "FORWARDING");
            let _ = writeln!(out, "  forward.tier_a         {}", self.tier_a_forwards);
            let _ = writeln!(out, "  forward.tier_b         {}", self.tier_b_forwards);
            let _ = writeln!(out, "  forward.dropped        {}", self.dropped_writers);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report_sections(&[]))
    }
}
