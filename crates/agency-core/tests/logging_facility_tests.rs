#![allow(clippy::unwrap_used, clippy::expect_used)]

use agency_core::errors::ExErrorKind;
use agency_core::logging_facility::init_test_capture;
use agency_core::{log_op_end, log_op_error, log_op_start, AgencyError};
use agency_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE};
use agency_core_types::Sensitive;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op = "logging_test_start_1";

    log_op_start!(op, entity_id = 7);

    let events = capture.events_for_op(op);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("entity_id"), Some("7"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op = "logging_test_end_2";

    log_op_end!(op, duration_ms = 42);

    let end = capture
        .events_for_op(op)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("end event");
    assert_eq!(end.field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_carries_code() {
    let capture = init_test_capture();
    let op = "logging_test_error_3";

    let err = AgencyError::malformed("wrong field count 3 for command '1'");
    log_op_error!(op, err, duration_ms = 0);

    let error = capture
        .events_for_op(op)
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(
        error.field(FIELD_ERR_CODE),
        Some(ExErrorKind::MalformedCommand.code())
    );
    // the caller keeps ownership of the error
    assert!(err.to_string().contains("wrong field count"));
}

#[test]
fn test_start_end_pairing() {
    let capture = init_test_capture();
    let op = "logging_test_pairing_4";

    log_op_start!(op);
    log_op_end!(op, duration_ms = 1);

    assert_eq!(
        capture.count_events(|e| e.is(op, EVENT_START)),
        1,
        "exactly one start"
    );
    assert_eq!(
        capture.count_events(|e| e.is(op, EVENT_END)),
        1,
        "exactly one end"
    );
}

#[test]
fn test_sensitive_values_are_redacted() {
    let capture = init_test_capture();
    let op = "logging_test_redaction_5";

    let phone = Sensitive::new("555-0100".to_string());
    log_op_start!(op, phone = %phone);

    let start = capture.events_for_op(op).pop().expect("start event");
    assert_eq!(start.field("phone"), Some("***REDACTED***"));
}
