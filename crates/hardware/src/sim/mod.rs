//! Simulation façade and program loading.
//!
//! Provides the `Simulator` that owns the core, and the program-image
//! reader and writer used to feed it.

/// Binary program images and assembler listings.
pub mod loader;

/// Top-level simulator owning the core.
pub mod simulator;

pub use simulator::Simulator;
