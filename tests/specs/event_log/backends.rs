//! Backend selection through runtime configuration.

use crate::prelude::*;
use evlog_core::test_support::{conf, numbered_event};
use evlog_storage::BACKEND_KEY;
use serde_json::json;

#[test]
fn noop_backend_accepts_events_without_writing() {
    let runtime_conf = conf(&[(BACKEND_KEY, json!("noop"))]);
    let mut worker = Worker::start_with(&runtime_conf, &conf(&[]));

    worker.log(&numbered_event(1));
    worker.close();

    assert!(!worker.events_log().exists());
}

#[test]
fn json_format_argument_is_honoured_by_the_factory_logger() {
    let mut worker = Worker::start_with(&conf(&[]), &conf(&[("format", json!("json"))]));

    worker.log(&numbered_event(9));
    worker.close();

    let line = worker.read_log();
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(value["component"], "spout");
    assert_eq!(value["values"], json!([9]));
}
