//! Prepare, log and close as the host sees them.

use crate::prelude::*;
use evlog_core::test_support::{conf, tuple_event, worker_identity};
use evlog_core::{EventLogError, EventLogger};
use evlog_storage::FileEventLogger;
use similar_asserts::assert_eq;
use std::time::Duration;

#[test]
fn prepare_creates_events_log_in_artifact_root() {
    let worker = Worker::start();

    assert!(worker.events_log().is_file());
    assert_eq!(worker.events_log(), worker.root().join("wid").join("events.log"));
    assert!(worker.read_log().is_empty());
}

#[test]
fn prepare_creates_every_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("x").join("y").join("z");
    assert!(!dir.path().join("x").exists());

    let mut logger = FileEventLogger::new();
    logger
        .prepare(&conf(&[]), &conf(&[]), &worker_identity(&root))
        .unwrap();

    assert!(dir.path().join("x").is_dir());
    assert!(dir.path().join("x/y").is_dir());
    assert!(root.is_dir());
    assert!(root.join("events.log").is_file());
    logger.close();
}

#[test]
fn logged_event_appears_within_the_default_flush_interval() {
    let mut worker = Worker::start();
    let event = tuple_event("A", "S", &[1, 2]);

    worker.log(&event);
    std::thread::sleep(Duration::from_millis(1100));

    assert_eq!(worker.read_log(), format!("{event}\n"));

    worker.close();
    assert_eq!(worker.read_log(), format!("{event}\n"));
}

#[test]
fn close_is_safe_to_repeat() {
    let mut worker = Worker::start();
    worker.close();
    worker.close();
}

#[test]
fn log_after_close_is_rejected() {
    let mut worker = Worker::start();
    worker.close();

    let err = worker.logger.log(&tuple_event("A", "S", &[1])).unwrap_err();
    assert!(matches!(err, EventLogError::InvalidState { .. }));
}

#[test]
fn setup_failure_is_returned_to_the_host() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("file");
    std::fs::write(&not_a_dir, "").unwrap();

    let mut logger = FileEventLogger::new();
    let err = logger
        .prepare(&conf(&[]), &conf(&[]), &worker_identity(&not_a_dir))
        .unwrap_err();

    assert!(matches!(err, EventLogError::Setup { .. }));
}
