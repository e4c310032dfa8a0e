//! Host-side error definitions.
//!
//! The core itself never fails: unrecognised encodings decode to no-ops and
//! hazards are resolved by stalling. Errors only arise on the host side of
//! the model, when building configurations and programs:
//! 1. **Configuration:** JSON parse failures and configuration file I/O.
//! 2. **Programs:** Malformed image lines, bad assembler operands, oversize programs.

use thiserror::Error;

/// Errors raised while configuring the simulator or preparing a program.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A program image line was not a 32-digit binary string.
    #[error("image line {line}: expected 32 binary digits, found '{text}'")]
    ImageLine {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },

    /// An assembler operand could not be parsed.
    #[error("line {line}: bad operand '{operand}' for '{mnemonic}'")]
    Operand {
        /// 1-based source line number.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Offending operand text.
        operand: String,
    },

    /// An instruction was given the wrong number of operands.
    #[error("line {line}: '{mnemonic}' takes {expected} operands, found {found}")]
    OperandCount {
        /// 1-based source line number.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Operands the format requires.
        expected: usize,
        /// Operands supplied.
        found: usize,
    },

    /// The program does not fit the instruction store.
    #[error("program of {words} words exceeds instruction store of {capacity} words")]
    ProgramTooLarge {
        /// Program length in words.
        words: usize,
        /// Instruction-store capacity in words.
        capacity: usize,
    },
}

/// Convenience alias for host-side results.
pub type SimResult<T> = Result<T, SimError>;
