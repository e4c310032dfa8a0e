//! Instruction pipeline control plane.
//!
//! This module contains the machinery between the instruction store and the
//! register file. It includes the following components:
//! 1. **Fetch:** Pair-organised instruction store and the fetch stage.
//! 2. **Latches:** Fetch pair, retry buffer and per-cycle issue record.
//! 3. **Delay Lines:** Per-unit in-flight writer records.
//! 4. **Scoreboard:** The flat writer-tuple table rebuilt every cycle.
//! 5. **Hazards:** Dual-issue scoring and the issue state machine.
//! 6. **Forwarding:** The two 7-deep per-lane bypass queues.

/// Per-unit delay lines of in-flight writer records.
pub mod delay_line;

/// Instruction store and fetch stage.
pub mod fetch;

/// Tier B forward network.
pub mod forward;

/// Dual-issue hazard scoring and issue states.
pub mod hazards;

/// Fetch pair, retry buffer and issue record.
pub mod latches;

/// Writer-tuple scoreboard.
pub mod scoreboard;
