//! Program Image Loader.
//!
//! This module reads and writes the text program image used by the simulator. It provides:
//! 1. **Parsing:** One 32-digit binary string per line; blank lines are skipped.
//! 2. **Writing:** The inverse of parsing, one word per line.
//! 3. **Listing:** `binary<TAB>0xHEX<TAB>source` lines for inspecting assembler output.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::common::error::{SimError, SimResult};
use crate::isa::asm::AssembledLine;

/// Parses a binary program image.
///
/// Every non-blank line must be exactly 32 `0`/`1` digits, most significant
/// bit first. Surrounding whitespace is ignored.
pub fn parse_image(text: &str) -> SimResult<Vec<u32>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, digits)| {
            if digits.len() != 32 || !digits.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(SimError::ImageLine {
                    line,
                    text: digits.to_string(),
                });
            }
            u32::from_str_radix(digits, 2).map_err(|_| SimError::ImageLine {
                line,
                text: digits.to_string(),
            })
        })
        .collect()
}

/// Renders `words` as a binary program image.
pub fn write_image(words: &[u32]) -> String {
    let mut out = String::with_capacity(words.len() * 33);
    for word in words {
        let _ = writeln!(out, "{word:032b}");
    }
    out
}

/// Renders assembled lines as a listing: binary, upper-case hex and the
/// source line exactly as written.
pub fn write_listing(lines: &[AssembledLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(out, "{:032b}\t0x{:08X}\t{}", line.word, line.word, line.source);
    }
    out
}

/// Reads and parses a program image file.
pub fn load_image_file(path: impl AsRef<Path>) -> SimResult<Vec<u32>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_image(&text)
}
