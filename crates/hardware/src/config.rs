//! Configuration system for the SPU simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline sizes for the local store and instruction store.
//! 2. **Structures:** Hierarchical config for general, core, and run settings.
//! 3. **Enums:** Register-file reset pattern.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`, `Config::from_file`)
//! or built with `Config::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
///
/// These values define the baseline core configuration when not
/// explicitly overridden in JSON configuration.
mod defaults {
    use crate::common::constants::{DEFAULT_INSTRUCTION_WORDS, DEFAULT_LOCAL_STORE_BYTES};

    /// Local store size in bytes (32 KiB).
    pub const LOCAL_STORE_BYTES: usize = DEFAULT_LOCAL_STORE_BYTES;

    /// Instruction store capacity in words.
    pub const INSTRUCTION_WORDS: usize = DEFAULT_INSTRUCTION_WORDS;

    /// Cycle bound for `run_until_drained`.
    ///
    /// Programs that loop forever stop here instead of hanging the host.
    pub const MAX_CYCLES: u64 = 1_000_000;
}

/// Register-file contents after reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RegisterInit {
    /// Every register reads as zero.
    #[default]
    Zero,
    /// Every word of register `i` holds `i`.
    ///
    /// Makes operand routing visible in tests without any setup code.
    Indexed,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use spusim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.trace, false);
/// assert_eq!(config.core.local_store_bytes, 32 * 1024);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use spusim_core::config::{Config, RegisterInit};
///
/// let json = r#"{
///     "general": { "trace": true, "start_pc": 4 },
///     "core": { "register_init": "Indexed" },
///     "run": { "max_cycles": 500 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.general.start_pc, 4);
/// assert_eq!(config.core.register_init, RegisterInit::Indexed);
/// assert_eq!(config.core.instruction_words, 2048);
/// assert_eq!(config.run.max_cycles, 500);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Core storage and reset configuration
    #[serde(default)]
    pub core: CoreConfig,
    /// Run-loop bounds
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage `tracing` events (fetch, issue, forward, commit).
    #[serde(default)]
    pub trace: bool,

    /// Initial program counter, in instruction words.
    #[serde(default)]
    pub start_pc: u32,

    /// Record diagnostics for unrecognised encodings and dropped forward writers.
    #[serde(default)]
    pub diagnostics: bool,
}

/// Core storage sizes and reset behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Local store size in bytes; rounded down to whole quadwords.
    #[serde(default = "CoreConfig::default_local_store_bytes")]
    pub local_store_bytes: usize,

    /// Instruction store capacity in words.
    #[serde(default = "CoreConfig::default_instruction_words")]
    pub instruction_words: usize,

    /// Register-file contents after reset.
    #[serde(default)]
    pub register_init: RegisterInit,
}

impl CoreConfig {
    /// Returns the default local store size in bytes.
    fn default_local_store_bytes() -> usize {
        defaults::LOCAL_STORE_BYTES
    }

    /// Returns the default instruction store capacity.
    fn default_instruction_words() -> usize {
        defaults::INSTRUCTION_WORDS
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            local_store_bytes: defaults::LOCAL_STORE_BYTES,
            instruction_words: defaults::INSTRUCTION_WORDS,
            register_init: RegisterInit::default(),
        }
    }
}

/// Run-loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Upper bound on cycles simulated by `run_until_drained`.
    #[serde(default = "RunConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl RunConfig {
    /// Returns the default cycle bound.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}
