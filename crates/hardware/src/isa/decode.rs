//! SPU Instruction Decoder.
//!
//! This module turns a raw 32-bit word into a [`Decoded`] descriptor. The
//! classifier extracts the opcode field at each candidate width (11, 9, 8,
//! 7 and 4 bits, longest first) and matches it against one lane's table.
//! The first match fixes the format class, and the format class fixes which
//! register and immediate fields are meaningful.
//!
//! The all-zero word and words no row matches classify as the unit-less,
//! lane-less no-op, so decoding never fails.

use crate::core::units::Lane;
use crate::isa::instruction::{Decoded, Format, InstructionBits, Operand};
use crate::isa::opcodes::{self, OpcodeInfo, Shape};

/// Finds the row of `lane`'s table that `raw` encodes, if any.
pub fn lookup(raw: u32, lane: Lane) -> Option<&'static OpcodeInfo> {
    if raw == 0 {
        return None;
    }
    let rows = opcodes::table(lane);
    Format::SEARCH_WIDTHS.iter().find_map(|&width| {
        let field = raw.opcode_field(width);
        rows.iter()
            .find(|info| info.format.opcode_width() == width && info.bits == field)
    })
}

/// Classifies `raw` against the opcode table of one lane.
///
/// Returns the no-op descriptor when the word is zero or does not belong to
/// that lane's opcode space.
pub fn classify(raw: u32, lane: Lane) -> Decoded {
    lookup(raw, lane).map_or_else(|| Decoded::noop(raw), |info| build(raw, info))
}

/// Decodes `raw`, trying the even table first and the odd table second.
///
/// The lane of the result comes from the matching row, not from the fetch
/// slot the word arrived in.
pub fn decode(raw: u32) -> Decoded {
    lookup(raw, Lane::Even)
        .or_else(|| lookup(raw, Lane::Odd))
        .map_or_else(|| Decoded::noop(raw), |info| build(raw, info))
}

/// Whether `raw` matches any row of either table.
pub fn is_recognized(raw: u32) -> bool {
    lookup(raw, Lane::Even).is_some() || lookup(raw, Lane::Odd).is_some()
}

fn immediate(raw: u32, format: Format) -> i32 {
    match format {
        Format::Rr | Format::Rrr => 0,
        Format::Ri7 => raw.i7(),
        Format::Ri10 | Format::LsImm => raw.i10(),
        Format::Ri16 => raw.i16(),
        Format::Ri18 => raw.i18(),
    }
}

fn build(raw: u32, info: &OpcodeInfo) -> Decoded {
    let rt = if info.format == Format::Rrr {
        raw.rrr_rt()
    } else {
        raw.rt()
    };
    let ra = Operand::reg(raw.ra());
    let rb = Operand::reg(raw.rb());
    let rt_read = Operand::reg(raw.rt());
    let none = Operand::NONE;

    // (writes rt, a, b, c)
    let (write, a, b, c) = match info.shape {
        Shape::RtRaRb => (true, ra, rb, none),
        Shape::RtRa | Shape::RtRaImm => (true, ra, none, none),
        Shape::RtImm => (true, none, none, none),
        Shape::RtImmMerge => (true, none, none, rt_read),
        Shape::Rrr => (true, ra, rb, Operand::reg(raw.rc())),
        Shape::StoreRaRb => (false, ra, rb, rt_read),
        Shape::StoreRaImm => (false, ra, none, rt_read),
        Shape::StoreImm | Shape::TestImm => (false, none, none, rt_read),
        Shape::BranchRa => (false, ra, none, none),
        Shape::LinkRa => (true, ra, none, none),
        Shape::TestRa => (false, ra, none, rt_read),
        Shape::LinkImm => (true, none, none, none),
        Shape::BranchImm | Shape::Empty => (false, none, none, none),
    };

    Decoded {
        raw,
        op: info.op,
        format: info.format,
        unit: info.unit,
        lane: Some(info.lane),
        dest: rt,
        write,
        a,
        b,
        c,
        imm: immediate(raw, info.format),
    }
}
