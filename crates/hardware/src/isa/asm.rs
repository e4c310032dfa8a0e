//! Line-oriented SPU assembler.
//!
//! Turns assembly text into instruction words using the opcode catalogue.
//! The accepted dialect is deliberately small:
//! 1. **Lines:** One instruction per line; `//` starts a comment; blank lines are skipped.
//! 2. **Termination:** A mnemonic containing `stop` ends the program.
//! 3. **Operands:** Separated by commas and/or whitespace. Registers are written
//!    `$N`, `rN` or bare `N`; immediates are decimal or `0x` hex and are truncated
//!    to their field width. `imm($ra)` is the displacement form of `lqd`/`stqd`.
//! 4. **Unknown mnemonics:** Encode with an all-zero opcode, their numeric
//!    operands packed into consecutive 7-bit fields, so they decode as no-ops.
//!
//! Branch and displacement immediates are raw field values: branch offsets
//! count instruction words and `lqd`/`stqd` displacements count quadwords.

use tracing::warn;

use crate::common::error::{SimError, SimResult};
use crate::common::REGISTER_COUNT;
use crate::isa::instruction::Format;
use crate::isa::opcodes::{self, OpcodeInfo, Shape};

/// One assembled instruction together with the text it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledLine {
    /// Encoded instruction word.
    pub word: u32,
    /// Source text of the line, comment included.
    pub source: String,
}

/// Assembles `source` into instruction words.
pub fn assemble(source: &str) -> SimResult<Vec<u32>> {
    Ok(assemble_lines(source)?
        .into_iter()
        .map(|line| line.word)
        .collect())
}

/// Assembles `source`, keeping each word's originating line.
pub fn assemble_lines(source: &str) -> SimResult<Vec<AssembledLine>> {
    let mut out = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        let code = text.split("//").next().unwrap_or_default().trim();
        let mut tokens = code
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        let Some(mnemonic) = tokens.next() else {
            continue;
        };
        if mnemonic.to_ascii_lowercase().contains("stop") {
            break;
        }
        let operands: Vec<&str> = tokens.collect();
        let word = match opcodes::by_mnemonic(mnemonic) {
            Some(info) => encode(info, &operands, line)?,
            None => {
                warn!(line, mnemonic, "unknown mnemonic encodes as no-op");
                pack_unknown(&operands, mnemonic, line)?
            }
        };
        out.push(AssembledLine {
            word,
            source: text.to_owned(),
        });
    }
    Ok(out)
}

/// Encodes one instruction from its table row and operand tokens.
pub fn encode(info: &OpcodeInfo, operands: &[&str], line: usize) -> SimResult<u32> {
    let ctx = Ctx {
        info,
        operands,
        line,
    };
    let expected = match info.shape {
        Shape::RtRaRb | Shape::StoreRaRb => 3,
        Shape::RtRaImm if info.format != Format::LsImm => 3,
        Shape::Rrr => 4,
        Shape::BranchRa | Shape::BranchImm => 1,
        Shape::Empty => 0,
        _ => 2,
    };
    if operands.len() != expected {
        return Err(SimError::OperandCount {
            line,
            mnemonic: info.mnemonic.to_owned(),
            expected,
            found: operands.len(),
        });
    }

    // (rt, ra, rb, rc, imm)
    let (rt, ra, rb, rc, imm) = match info.shape {
        Shape::RtRaRb | Shape::StoreRaRb => (ctx.reg(0)?, ctx.reg(1)?, ctx.reg(2)?, 0, 0),
        Shape::RtRa | Shape::LinkRa | Shape::TestRa => (ctx.reg(0)?, ctx.reg(1)?, 0, 0, 0),
        Shape::RtRaImm | Shape::StoreRaImm if info.format == Format::LsImm => {
            let (imm, ra) = ctx.displacement(1)?;
            (ctx.reg(0)?, ra, 0, 0, imm)
        }
        Shape::RtRaImm | Shape::StoreRaImm => (ctx.reg(0)?, ctx.reg(1)?, 0, 0, ctx.imm(2)?),
        Shape::RtImm
        | Shape::RtImmMerge
        | Shape::StoreImm
        | Shape::LinkImm
        | Shape::TestImm => (ctx.reg(0)?, 0, 0, 0, ctx.imm(1)?),
        Shape::Rrr => (ctx.reg(0)?, ctx.reg(1)?, ctx.reg(2)?, ctx.reg(3)?, 0),
        Shape::BranchRa => (0, ctx.reg(0)?, 0, 0, 0),
        Shape::BranchImm => (0, 0, 0, 0, ctx.imm(0)?),
        Shape::Empty => (0, 0, 0, 0, 0),
    };

    let imm = imm as u32;
    let fields = match info.format {
        Format::Rr => (rb << 14) | (ra << 7) | rt,
        Format::Rrr => (rt << 21) | (rb << 14) | (ra << 7) | rc,
        Format::Ri7 => ((imm & 0x7F) << 14) | (ra << 7) | rt,
        Format::Ri10 | Format::LsImm => ((imm & 0x3FF) << 14) | (ra << 7) | rt,
        Format::Ri16 => ((imm & 0xFFFF) << 7) | rt,
        Format::Ri18 => ((imm & 0x3_FFFF) << 7) | rt,
    };
    Ok(info.template() | fields)
}

struct Ctx<'a> {
    info: &'a OpcodeInfo,
    operands: &'a [&'a str],
    line: usize,
}

impl Ctx<'_> {
    fn bad(&self, operand: &str) -> SimError {
        SimError::Operand {
            line: self.line,
            mnemonic: self.info.mnemonic.to_owned(),
            operand: operand.to_owned(),
        }
    }

    fn reg(&self, idx: usize) -> SimResult<u32> {
        let text = self.operands[idx];
        parse_register(text).ok_or_else(|| self.bad(text))
    }

    fn imm(&self, idx: usize) -> SimResult<i32> {
        let text = self.operands[idx];
        parse_immediate(text).ok_or_else(|| self.bad(text))
    }

    /// Parses `imm($ra)`.
    fn displacement(&self, idx: usize) -> SimResult<(i32, u32)> {
        let text = self.operands[idx];
        let parsed = text
            .strip_suffix(')')
            .and_then(|t| t.split_once('('))
            .and_then(|(imm, reg)| Some((parse_immediate(imm)?, parse_register(reg)?)));
        parsed.ok_or_else(|| self.bad(text))
    }
}

/// Parses a register operand: `$N`, `rN`, `$rN` or `N`, with `N < 128`.
pub fn parse_register(text: &str) -> Option<u32> {
    let t = text.trim_start_matches('$');
    let t = t
        .strip_prefix('r')
        .or_else(|| t.strip_prefix('R'))
        .unwrap_or(t);
    let n: u32 = t.parse().ok()?;
    (n < REGISTER_COUNT as u32).then_some(n)
}

/// Parses a decimal or `0x` hex immediate, optionally negative.
pub fn parse_immediate(text: &str) -> Option<i32> {
    let (neg, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = match body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => body.parse::<i64>().ok()?,
    };
    let value = if neg { -value } else { value };
    Some(value as i32)
}

fn pack_unknown(operands: &[&str], mnemonic: &str, line: usize) -> SimResult<u32> {
    operands.iter().try_fold(0u32, |acc, text| {
        let value = parse_register(text)
            .or_else(|| parse_immediate(text).map(|v| v as u32))
            .ok_or_else(|| SimError::Operand {
                line,
                mnemonic: mnemonic.to_owned(),
                operand: (*text).to_owned(),
            })?;
        Ok(((acc << 7) | (value & 0x7F)) & 0x1F_FFFF)
    })
}
