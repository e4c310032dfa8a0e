//! Assembler Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use spusim_core::common::SimError;
use spusim_core::isa::asm::{assemble, assemble_lines, parse_immediate, parse_register};
use spusim_core::isa::decode::decode;
use spusim_core::isa::opcodes::Opcode;

#[rstest]
#[case("$5", Some(5))]
#[case("r12", Some(12))]
#[case("$r3", Some(3))]
#[case("127", Some(127))]
#[case("$128", None)]
#[case("$x", None)]
fn register_syntax(#[case] text: &str, #[case] expected: Option<u32>) {
    assert_eq!(parse_register(text), expected);
}

#[rstest]
#[case("42", Some(42))]
#[case("-7", Some(-7))]
#[case("0x1F", Some(31))]
#[case("-0x10", Some(-16))]
#[case("ten", None)]
fn immediate_syntax(#[case] text: &str, #[case] expected: Option<i32>) {
    assert_eq!(parse_immediate(text), expected);
}

#[test]
fn displacement_form_counts_quadwords() {
    let d = decode(assemble("lqd $4, 3($1)").unwrap()[0]);
    assert_eq!(d.op, Opcode::Lqd);
    assert_eq!(d.dest, 4);
    assert_eq!(d.a.addr, 1);
    assert_eq!(d.imm, 3);
}

#[test]
fn commas_and_spaces_both_separate() {
    assert_eq!(
        assemble("a $1,$2,$3").unwrap(),
        assemble("a $1 $2 $3").unwrap()
    );
}

#[test]
fn immediates_truncate_to_field_width() {
    let d = decode(assemble("ai $1, $2, 1023").unwrap()[0]);
    assert_eq!(d.imm, -1);
}

#[test]
fn listing_keeps_source_text() {
    let lines = assemble_lines("il $1, 1 // one\n\nlnop\nstop\nnop").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].source, "il $1, 1 // one");
}

#[test]
fn bad_operand_reports_line() {
    match assemble("il $1, 1\nai $1, $2, zz") {
        Err(SimError::Operand { line, operand, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(operand, "zz");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_displacement_is_operand_error() {
    assert!(matches!(
        assemble("lqd $1, $2"),
        Err(SimError::Operand { .. })
    ));
}
