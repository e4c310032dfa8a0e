//! Program Image Loading Tests.

use std::fs;

use pretty_assertions::assert_eq;
use spusim_core::Simulator;
use spusim_core::common::error::SimError;
use spusim_core::common::Quadword;
use spusim_core::config::Config;
use spusim_core::isa::asm::{assemble, assemble_lines};
use spusim_core::sim::loader::{load_image_file, write_image, write_listing};
use tempfile::tempdir;

const PROGRAM: &str = "il $1, 5\nlnop\nai $2, $1, 2\nlnop";

#[test]
fn image_file_runs_like_assembly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("program.txt");
    fs::write(&path, write_image(&assemble(PROGRAM).unwrap())).unwrap();

    let mut from_image = Simulator::new(&Config::default());
    from_image.load_image(&path).unwrap();
    assert!(from_image.run_until_drained());

    let mut from_asm = Simulator::new(&Config::default());
    from_asm.load_assembly(PROGRAM).unwrap();
    assert!(from_asm.run_until_drained());

    assert_eq!(from_image.register(2), Quadword::splat_word(7));
    assert_eq!(from_image.stats(), from_asm.stats());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    match load_image_file(&path) {
        Err(SimError::Io { path: reported, .. }) => {
            assert_eq!(reported, path.display().to_string());
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn malformed_line_is_rejected() {
    let mut sim = Simulator::new(&Config::default());
    let text = "00000000000000000000000000000000\n0000000000000000000000000000002\n";
    assert!(matches!(
        sim.load_image_str(text),
        Err(SimError::ImageLine { line: 2, .. })
    ));
}

#[test]
fn listing_has_one_row_per_instruction() {
    let lines = assemble_lines("// setup\nfm $1, $2, $3\n\n    lnop // pad\n").unwrap();
    let listing = write_listing(&lines);
    let rows: Vec<_> = listing.lines().collect();
    assert_eq!(rows.len(), 2);
    for (row, line) in rows.iter().zip(&lines) {
        let columns: Vec<_> = row.split('\t').collect();
        assert_eq!(columns.len(), 3);
        assert_eq!(u32::from_str_radix(columns[0], 2).unwrap(), line.word);
        assert_eq!(columns[1], format!("0x{:08X}", line.word));
        assert_eq!(columns[2], line.source);
    }
    assert!(rows[0].split('\t').nth(1).unwrap().starts_with("0x58C"));
    assert!(rows[1].ends_with("\t    lnop // pad"));
}
