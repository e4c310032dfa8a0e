//! Instruction Disassembler.
//!
//! Renders a [`Decoded`] descriptor as SPU assembly for trace output and
//! test diagnostics. The output uses the operand order the assembler
//! accepts, so disassembled text reassembles to the same word.
//!
//! # Usage
//!
//! ```
//! use spusim_core::isa::decode::decode;
//! use spusim_core::isa::disasm::disassemble;
//!
//! // a $1, $2, $3
//! let word = (0b000_1100_0000 << 21) | (3 << 14) | (2 << 7) | 1;
//! assert_eq!(disassemble(&decode(word)), "a $1, $2, $3");
//! ```

use crate::isa::instruction::{Decoded, Format};
use crate::isa::opcodes::{self, Opcode, Shape};

/// Disassembles a decoded instruction.
///
/// Returns `"null"` for the all-zero word and `.long 0x........` for words
/// no opcode row matches.
pub fn disassemble(d: &Decoded) -> String {
    let info = match d.op {
        Opcode::Null => return "null".to_owned(),
        Opcode::Unknown => return format!(".long 0x{:08x}", d.raw),
        op => match opcodes::by_opcode(op) {
            Some(info) => info,
            None => return format!(".long 0x{:08x}", d.raw),
        },
    };

    let m = info.mnemonic;
    let rt = d.dest;
    let ra = d.a.addr;
    let rb = d.b.addr;
    let rc = d.c.addr;
    let imm = d.imm;

    match info.shape {
        Shape::RtRaRb => format!("{m} ${rt}, ${ra}, ${rb}"),
        Shape::RtRa | Shape::LinkRa => format!("{m} ${rt}, ${ra}"),
        Shape::RtRaImm if d.format == Format::LsImm => format!("{m} ${rt}, {imm}(${ra})"),
        Shape::RtRaImm => format!("{m} ${rt}, ${ra}, {imm}"),
        Shape::RtImm | Shape::LinkImm => format!("{m} ${rt}, {imm}"),
        Shape::RtImmMerge | Shape::StoreImm | Shape::TestImm => format!("{m} ${rc}, {imm}"),
        Shape::Rrr => format!("{m} ${rt}, ${ra}, ${rb}, ${rc}"),
        Shape::StoreRaRb => format!("{m} ${rc}, ${ra}, ${rb}"),
        Shape::StoreRaImm => format!("{m} ${rc}, {imm}(${ra})"),
        Shape::BranchRa => format!("{m} ${ra}"),
        Shape::TestRa => format!("{m} ${rc}, ${ra}"),
        Shape::BranchImm => format!("{m} {imm}"),
        Shape::Empty => m.to_owned(),
    }
}
