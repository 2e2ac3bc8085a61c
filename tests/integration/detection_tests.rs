use crate::sim::{MockAdmin, SimBoard, CPUINFO_GEN1};
use raspi_sysfs_gpio::{
    header_pins, resolve, BoardGeneration, ErrorKind, LineHandle, LineOptions, GEN1_PINS,
    GEN2_PINS,
};
use std::fs;

fn unexported() -> LineOptions {
    LineOptions::default().with_export(false)
}

#[test]
fn test_gen1_board_uses_first_pin_table() {
    let sim = SimBoard::new(CPUINFO_GEN1, MockAdmin::default());

    assert_eq!(sim.board.generation().unwrap(), BoardGeneration::Gen1);

    let handle = LineHandle::new(sim.board.clone(), 3, unexported()).unwrap();
    assert_eq!(handle.header_pin(), 3);
    assert_eq!(handle.line(), 0);

    let err = LineHandle::new(sim.board.clone(), 29, unexported()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
}

#[test]
fn test_gen2_board_uses_second_pin_table() {
    let sim = SimBoard::gen2();

    assert_eq!(sim.board.generation().unwrap(), BoardGeneration::Gen2);
    let handle = LineHandle::new(sim.board.clone(), 3, unexported()).unwrap();
    assert_eq!(handle.line(), 2);
    let handle = LineHandle::new(sim.board.clone(), 40, unexported()).unwrap();
    assert_eq!(handle.line(), 21);
}

#[test]
fn test_detection_is_not_repeated() {
    let sim = SimBoard::gen2();
    let _first = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap();

    fs::write(sim.cpuinfo_path(), CPUINFO_GEN1).unwrap();
    let handle = LineHandle::new(sim.board.clone(), 13, unexported()).unwrap();
    assert_eq!(handle.line(), 27);

    fs::remove_file(sim.cpuinfo_path()).unwrap();
    assert_eq!(sim.board.generation().unwrap(), BoardGeneration::Gen2);
}

#[test]
fn test_undetectable_board_fails_construction() {
    let sim = SimBoard::new("Hardware\t: BCM2835\n", MockAdmin::default());

    let err = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(sim.admin.calls().is_empty());
}

#[test]
fn test_every_table_entry_resolves() {
    for (generation, table) in [
        (BoardGeneration::Gen1, GEN1_PINS),
        (BoardGeneration::Gen2, GEN2_PINS),
    ] {
        assert_eq!(header_pins(generation).count(), table.len());
        for &(pin, line) in table {
            assert_eq!(resolve(generation, pin).unwrap(), line);
        }
    }
}
