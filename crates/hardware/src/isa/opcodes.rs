//! Opcode catalogue.
//!
//! One table row per mnemonic, giving its opcode bits, format class, target
//! execution unit, issue lane and operand roles. The same table drives the
//! classifier, the assembler and the disassembler, so encodings cannot
//! drift between them.
//!
//! The even and odd lanes have disjoint opcode spaces: classifying a word
//! against the even rows first and the odd rows second is unambiguous.

use crate::core::units::{Lane, UnitId};
use crate::isa::instruction::Format;

/// Operation selected by the opcode field.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// The all-zero word.
    #[default]
    Null,
    /// A word no table row matches.
    Unknown,

    // Fixed-point, simple.
    A,
    Ah,
    Sf,
    Sfh,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Andc,
    Orc,
    Eqv,
    Ceq,
    Ceqh,
    Ceqb,
    Cgt,
    Cgth,
    Cgtb,
    Clgt,
    Clgth,
    Clgtb,
    Clz,
    Xsbh,
    Xshw,
    Xswd,
    Ai,
    Ahi,
    Sfi,
    Sfhi,
    Andi,
    Ori,
    Xori,
    Ceqi,
    Cgti,
    Clgti,
    Il,
    Ilh,
    Ilhu,
    Iohl,
    Ila,
    Fsmbi,
    Selb,

    // Fixed-point, shift and rotate.
    Shl,
    Shlh,
    Rot,
    Roth,
    Rotm,
    Rotma,
    Shli,
    Shlhi,
    Roti,
    Rothi,
    Rotmi,
    Rotmai,

    // Byte.
    Cntb,
    Avgb,
    Absdb,
    Sumb,

    // Single precision and integer multiply.
    Fa,
    Fs,
    Fm,
    Fceq,
    Fcgt,
    Fma,
    Fms,
    Fnms,
    Mpy,
    Mpyu,
    Mpyh,
    Mpyi,
    Mpyui,
    Mpya,

    // Permute.
    Shlqby,
    Rotqby,
    Shlqbi,
    Rotqbi,
    Shlqbyi,
    Rotqbyi,
    Shlqbii,
    Rotqbii,
    Gb,
    Gbh,
    Gbb,
    Shufb,

    // Local store.
    Lqd,
    Lqx,
    Lqa,
    Stqd,
    Stqx,
    Stqa,

    // Branch.
    Br,
    Bra,
    Brsl,
    Brasl,
    Bi,
    Bisl,
    Brz,
    Brnz,
    Brhz,
    Brhnz,
    Biz,
    Binz,
    Bihz,
    Bihnz,

    // Explicit no-ops.
    Nop,
    Lnop,
}

/// Which instruction fields an operation reads and writes.
///
/// Slot `a` is RA, slot `b` is RB, slot `c` is RC for RRR and RT wherever
/// RT is read rather than written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Writes RT, reads RA and RB.
    RtRaRb,
    /// Writes RT, reads RA.
    RtRa,
    /// Writes RT, reads RA; carries an immediate.
    RtRaImm,
    /// Writes RT; immediate only.
    RtImm,
    /// Writes RT and reads its old value; immediate.
    RtImmMerge,
    /// Writes RT, reads RA, RB and RC.
    Rrr,
    /// Reads RA, RB and RT as store data.
    StoreRaRb,
    /// Reads RA and RT as store data; immediate displacement.
    StoreRaImm,
    /// Reads RT as store data; absolute address.
    StoreImm,
    /// Reads RA as a branch target.
    BranchRa,
    /// Writes RT with the link, reads RA as target.
    LinkRa,
    /// Reads RT as a condition and RA as target.
    TestRa,
    /// Immediate target only.
    BranchImm,
    /// Writes RT with the link; immediate target.
    LinkImm,
    /// Reads RT as a condition; immediate target.
    TestImm,
    /// Touches no registers.
    Empty,
}

/// One row of the opcode catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Decoded operation.
    pub op: Opcode,
    /// Assembler mnemonic.
    pub mnemonic: &'static str,
    /// Opcode bits, right-aligned in `format.opcode_width()` bits.
    pub bits: u32,
    /// Format class.
    pub format: Format,
    /// Target unit; `None` for explicit no-ops.
    pub unit: Option<UnitId>,
    /// Issue lane.
    pub lane: Lane,
    /// Operand roles.
    pub shape: Shape,
}

impl OpcodeInfo {
    /// Opcode bits positioned at the top of a 32-bit word.
    pub const fn template(&self) -> u32 {
        self.bits << (32 - self.format.opcode_width())
    }

    /// Whether this row produces an integer result on a dual-latency unit.
    pub const fn is_integer(&self) -> bool {
        is_integer(self.op)
    }
}

/// Whether `op` executes on the integer side of the single-precision unit.
///
/// Only meaningful for ops routed to [`UnitId::SinglePrecision`]; every
/// other unit has a single latency.
pub const fn is_integer(op: Opcode) -> bool {
    matches!(
        op,
        Opcode::Mpy | Opcode::Mpyu | Opcode::Mpyh | Opcode::Mpyi | Opcode::Mpyui | Opcode::Mpya
    )
}

const fn row(
    op: Opcode,
    mnemonic: &'static str,
    bits: u32,
    format: Format,
    unit: UnitId,
    shape: Shape,
) -> OpcodeInfo {
    OpcodeInfo {
        op,
        mnemonic,
        bits,
        format,
        unit: Some(unit),
        lane: unit.lane(),
        shape,
    }
}

use Format::{LsImm, Ri7, Ri10, Ri16, Ri18, Rr, Rrr};
use Shape as S;
use UnitId::{Branch, Byte, Fixed1, Fixed2, LocalStore, Permute, SinglePrecision};

/// Rows classified against the even lane.
pub static EVEN_OPCODES: &[OpcodeInfo] = &[
    row(Opcode::A, "a", 0b000_1100_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Ah, "ah", 0b000_1100_1000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Sf, "sf", 0b000_0100_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Sfh, "sfh", 0b000_0100_1000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::And, "and", 0b000_1100_0001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Or, "or", 0b000_0100_0001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Xor, "xor", 0b010_0100_0001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Nand, "nand", 0b000_1100_1001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Nor, "nor", 0b000_0100_1001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Andc, "andc", 0b010_1100_0001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Orc, "orc", 0b010_1100_1001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Eqv, "eqv", 0b010_0100_1001, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Ceq, "ceq", 0b011_1100_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Ceqh, "ceqh", 0b011_1100_1000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Ceqb, "ceqb", 0b011_1101_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Cgt, "cgt", 0b010_0100_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Cgth, "cgth", 0b010_0100_1000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Cgtb, "cgtb", 0b010_0101_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Clgt, "clgt", 0b010_1100_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Clgth, "clgth", 0b010_1100_1000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Clgtb, "clgtb", 0b010_1101_0000, Rr, Fixed1, S::RtRaRb),
    row(Opcode::Clz, "clz", 0b010_1010_0101, Rr, Fixed1, S::RtRa),
    row(Opcode::Xsbh, "xsbh", 0b010_1011_0110, Rr, Fixed1, S::RtRa),
    row(Opcode::Xshw, "xshw", 0b010_1010_1110, Rr, Fixed1, S::RtRa),
    row(Opcode::Xswd, "xswd", 0b010_1010_0110, Rr, Fixed1, S::RtRa),
    row(Opcode::Ai, "ai", 0b0001_1100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Ahi, "ahi", 0b0001_1101, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Sfi, "sfi", 0b0000_1100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Sfhi, "sfhi", 0b0000_1101, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Andi, "andi", 0b0001_0100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Ori, "ori", 0b0000_0100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Xori, "xori", 0b0100_0100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Ceqi, "ceqi", 0b0111_1100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Cgti, "cgti", 0b0100_1100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Clgti, "clgti", 0b0101_1100, Ri10, Fixed1, S::RtRaImm),
    row(Opcode::Il, "il", 0b0_1000_0001, Ri16, Fixed1, S::RtImm),
    row(Opcode::Ilh, "ilh", 0b0_1000_0011, Ri16, Fixed1, S::RtImm),
    row(Opcode::Ilhu, "ilhu", 0b0_1000_0010, Ri16, Fixed1, S::RtImm),
    row(Opcode::Iohl, "iohl", 0b0_1100_0001, Ri16, Fixed1, S::RtImmMerge),
    row(Opcode::Fsmbi, "fsmbi", 0b0_0110_0101, Ri16, Fixed1, S::RtImm),
    row(Opcode::Ila, "ila", 0b010_0001, Ri18, Fixed1, S::RtImm),
    row(Opcode::Selb, "selb", 0b1000, Rrr, Fixed1, S::Rrr),
    row(Opcode::Shl, "shl", 0b000_0101_1011, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Shlh, "shlh", 0b000_0101_1111, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Rot, "rot", 0b000_0101_1000, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Roth, "roth", 0b000_0101_1100, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Rotm, "rotm", 0b000_0101_1001, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Rotma, "rotma", 0b000_0101_1010, Rr, Fixed2, S::RtRaRb),
    row(Opcode::Shli, "shli", 0b000_0111_1011, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Shlhi, "shlhi", 0b000_0111_1111, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Roti, "roti", 0b000_0111_1000, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Rothi, "rothi", 0b000_0111_1100, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Rotmi, "rotmi", 0b000_0111_1001, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Rotmai, "rotmai", 0b000_0111_1010, Ri7, Fixed2, S::RtRaImm),
    row(Opcode::Cntb, "cntb", 0b010_1011_0100, Rr, Byte, S::RtRa),
    row(Opcode::Avgb, "avgb", 0b000_1101_0011, Rr, Byte, S::RtRaRb),
    row(Opcode::Absdb, "absdb", 0b000_0101_0011, Rr, Byte, S::RtRaRb),
    row(Opcode::Sumb, "sumb", 0b010_0101_0011, Rr, Byte, S::RtRaRb),
    row(Opcode::Fa, "fa", 0b010_1100_0100, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Fs, "fs", 0b010_1100_0101, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Fm, "fm", 0b010_1100_0110, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Fceq, "fceq", 0b011_1100_0010, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Fcgt, "fcgt", 0b010_1100_0010, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Mpy, "mpy", 0b011_1100_0100, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Mpyu, "mpyu", 0b011_1100_1100, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Mpyh, "mpyh", 0b011_1100_0101, Rr, SinglePrecision, S::RtRaRb),
    row(Opcode::Mpyi, "mpyi", 0b0111_0100, Ri10, SinglePrecision, S::RtRaImm),
    row(Opcode::Mpyui, "mpyui", 0b0111_0101, Ri10, SinglePrecision, S::RtRaImm),
    row(Opcode::Mpya, "mpya", 0b1100, Rrr, SinglePrecision, S::Rrr),
    row(Opcode::Fma, "fma", 0b1110, Rrr, SinglePrecision, S::Rrr),
    row(Opcode::Fms, "fms", 0b1111, Rrr, SinglePrecision, S::Rrr),
    row(Opcode::Fnms, "fnms", 0b1101, Rrr, SinglePrecision, S::Rrr),
    OpcodeInfo {
        op: Opcode::Nop,
        mnemonic: "nop",
        bits: 0b010_0000_0001,
        format: Rr,
        unit: None,
        lane: Lane::Even,
        shape: S::Empty,
    },
];

/// Rows classified against the odd lane.
pub static ODD_OPCODES: &[OpcodeInfo] = &[
    row(Opcode::Shlqby, "shlqby", 0b001_1101_1111, Rr, Permute, S::RtRaRb),
    row(Opcode::Rotqby, "rotqby", 0b001_1101_1100, Rr, Permute, S::RtRaRb),
    row(Opcode::Shlqbi, "shlqbi", 0b001_1101_1011, Rr, Permute, S::RtRaRb),
    row(Opcode::Rotqbi, "rotqbi", 0b001_1101_1000, Rr, Permute, S::RtRaRb),
    row(Opcode::Shlqbyi, "shlqbyi", 0b001_1111_1111, Ri7, Permute, S::RtRaImm),
    row(Opcode::Rotqbyi, "rotqbyi", 0b001_1111_1100, Ri7, Permute, S::RtRaImm),
    row(Opcode::Shlqbii, "shlqbii", 0b001_1111_1011, Ri7, Permute, S::RtRaImm),
    row(Opcode::Rotqbii, "rotqbii", 0b001_1111_1000, Ri7, Permute, S::RtRaImm),
    row(Opcode::Gb, "gb", 0b001_1011_0000, Rr, Permute, S::RtRa),
    row(Opcode::Gbh, "gbh", 0b001_1011_0001, Rr, Permute, S::RtRa),
    row(Opcode::Gbb, "gbb", 0b001_1011_0010, Rr, Permute, S::RtRa),
    row(Opcode::Shufb, "shufb", 0b1011, Rrr, Permute, S::Rrr),
    row(Opcode::Lqd, "lqd", 0b0011_0100, LsImm, LocalStore, S::RtRaImm),
    row(Opcode::Lqx, "lqx", 0b001_1100_0100, Rr, LocalStore, S::RtRaRb),
    row(Opcode::Lqa, "lqa", 0b0_0110_0001, Ri16, LocalStore, S::RtImm),
    row(Opcode::Stqd, "stqd", 0b0010_0100, LsImm, LocalStore, S::StoreRaImm),
    row(Opcode::Stqx, "stqx", 0b001_0100_0100, Rr, LocalStore, S::StoreRaRb),
    row(Opcode::Stqa, "stqa", 0b0_0100_0001, Ri16, LocalStore, S::StoreImm),
    row(Opcode::Br, "br", 0b0_0110_0100, Ri16, Branch, S::BranchImm),
    row(Opcode::Bra, "bra", 0b0_0110_0000, Ri16, Branch, S::BranchImm),
    row(Opcode::Brsl, "brsl", 0b0_0110_0110, Ri16, Branch, S::LinkImm),
    row(Opcode::Brasl, "brasl", 0b0_0110_0010, Ri16, Branch, S::LinkImm),
    row(Opcode::Brz, "brz", 0b0_0100_0000, Ri16, Branch, S::TestImm),
    row(Opcode::Brnz, "brnz", 0b0_0100_0010, Ri16, Branch, S::TestImm),
    row(Opcode::Brhz, "brhz", 0b0_0100_0100, Ri16, Branch, S::TestImm),
    row(Opcode::Brhnz, "brhnz", 0b0_0100_0110, Ri16, Branch, S::TestImm),
    row(Opcode::Bi, "bi", 0b001_1010_1000, Rr, Branch, S::BranchRa),
    row(Opcode::Bisl, "bisl", 0b001_1010_1001, Rr, Branch, S::LinkRa),
    row(Opcode::Biz, "biz", 0b001_0010_1000, Rr, Branch, S::TestRa),
    row(Opcode::Binz, "binz", 0b001_0010_1001, Rr, Branch, S::TestRa),
    row(Opcode::Bihz, "bihz", 0b001_0010_1010, Rr, Branch, S::TestRa),
    row(Opcode::Bihnz, "bihnz", 0b001_0010_1011, Rr, Branch, S::TestRa),
    OpcodeInfo {
        op: Opcode::Lnop,
        mnemonic: "lnop",
        bits: 0b000_0000_0001,
        format: Rr,
        unit: None,
        lane: Lane::Odd,
        shape: S::Empty,
    },
];

/// Returns the table for `lane`.
pub fn table(lane: Lane) -> &'static [OpcodeInfo] {
    match lane {
        Lane::Even => EVEN_OPCODES,
        Lane::Odd => ODD_OPCODES,
    }
}

/// Looks up a row by mnemonic (case-insensitive) across both lanes.
pub fn by_mnemonic(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    EVEN_OPCODES
        .iter()
        .chain(ODD_OPCODES)
        .find(|info| info.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Looks up the row for a decoded operation.
pub fn by_opcode(op: Opcode) -> Option<&'static OpcodeInfo> {
    EVEN_OPCODES
        .iter()
        .chain(ODD_OPCODES)
        .find(|info| info.op == op)
}
