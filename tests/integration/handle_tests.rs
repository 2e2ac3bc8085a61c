use crate::sim::{MockAdmin, SimBoard, CPUINFO_GEN2};
use raspi_sysfs_gpio::{Direction, ErrorKind, LineHandle, LineOptions, PinIdentity};
use std::fs;

fn unexported() -> LineOptions {
    LineOptions::default().with_export(false)
}

#[test]
fn test_missing_identity_fails_before_io() {
    let sim = SimBoard::gen2();

    let err = LineHandle::new(sim.board.clone(), PinIdentity::Missing, unexported()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);

    let err = LineHandle::new(sim.board.clone(), "", LineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);

    assert!(sim.admin.calls().is_empty());
}

#[test]
fn test_non_numeric_identity_fails_before_io() {
    let sim = SimBoard::gen2();

    let err = LineHandle::new(sim.board.clone(), "led", LineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(err.to_string().contains("led"));
    assert!(sim.admin.calls().is_empty());
}

#[test]
fn test_unmapped_pin_names_the_pin() {
    let sim = SimBoard::gen2();

    let err = LineHandle::new(sim.board.clone(), 4, LineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert_eq!(err.context().pin, Some(4));
    assert!(err.to_string().contains("header pin 4"));
    assert!(sim.admin.calls().is_empty());
}

#[test]
fn test_handles_are_distinct() {
    let sim = SimBoard::gen2();

    let first = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap();
    let second = LineHandle::new(sim.board.clone(), 8, unexported()).unwrap();
    assert_ne!(first.line(), second.line());
}

#[tokio::test]
async fn test_write_failure_is_reported_through_the_result() {
    let sim = SimBoard::gen2();
    // gpio4 was never exported, so the value attribute does not exist.
    let handle = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap();

    let err = handle.write(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Write);
    assert_eq!(err.context().pin, Some(7));
    assert_eq!(err.context().value, Some(1));
}

#[tokio::test]
async fn test_set_direction_then_write() {
    let sim = SimBoard::gen2();
    sim.export_dir(4);
    let handle = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap();

    assert_eq!(handle.set_direction(Direction::Out).await.unwrap(), Direction::Out);
    assert_eq!(sim.attribute(4, "direction"), "out");

    assert_eq!(handle.write("TRUE").await.unwrap(), 1);
    assert_eq!(sim.attribute(4, "value"), "1");

    assert_eq!(handle.write("0").await.unwrap(), 0);
    assert_eq!(sim.attribute(4, "value"), "0");

    assert!(sim.admin.calls().is_empty());
}

#[tokio::test]
async fn test_default_open_exports_and_sets_direction() {
    let sim = SimBoard::gen2();
    sim.export_dir(4);

    let (handle, setup) = sim.board.open(7, LineOptions::default()).await.unwrap();
    setup.unwrap();

    assert_eq!(sim.admin.calls(), vec!["gpio-admin export 4 "]);
    assert_eq!(sim.attribute(4, "direction"), "out");
    assert!(handle.is_exported());
}

#[tokio::test]
async fn test_open_with_pull() {
    let sim = SimBoard::gen2();
    sim.export_dir(4);

    let options = LineOptions::default()
        .with_pull("pullup")
        .with_direction(Direction::In);
    let (_handle, setup) = sim.board.open("7", options).await.unwrap();
    setup.unwrap();

    assert_eq!(sim.admin.calls(), vec!["gpio-admin export 4 pullup"]);
    assert_eq!(sim.attribute(4, "direction"), "in");
}

#[tokio::test]
async fn test_failed_export_stops_setup() {
    let sim = SimBoard::new(CPUINFO_GEN2, MockAdmin::failing());
    let dir = sim.export_dir(4);

    let (handle, setup) = sim.board.open(7, LineOptions::default()).await.unwrap();
    let err = setup.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Export);
    assert_eq!(err.context().pin, Some(7));
    assert_eq!(err.context().line, Some(4));
    assert!(err.context().options.is_some());
    assert!(!dir.join("direction").exists());
    assert!(!handle.is_exported());
}

#[tokio::test]
async fn test_release_after_failed_direction() {
    let sim = SimBoard::gen2();

    // No gpio4 directory appears, so setting the direction fails after the claim.
    let (handle, setup) = sim.board.open(7, LineOptions::default()).await.unwrap();
    assert_eq!(setup.unwrap_err().kind(), ErrorKind::SetDirection);
    assert!(handle.is_exported());

    handle.release().await.unwrap();
    assert!(!handle.is_exported());
    assert_eq!(
        sim.admin.calls(),
        vec!["gpio-admin export 4 ", "gpio-admin unexport 4"]
    );
}

#[tokio::test]
async fn test_read_returns_raw_attribute() {
    let sim = SimBoard::gen2();
    let dir = sim.export_dir(4);
    fs::write(dir.join("value"), "1\n").unwrap();

    let handle = LineHandle::new(sim.board.clone(), 7, unexported()).unwrap();
    assert_eq!(handle.read().await.unwrap(), b"1\n".to_vec());
}
