// Operation boundary events emitted while applying commands

use agency_core::logging_facility::init_test_capture;
use agency_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE};
use agency_engine::run_script_text;
use agency_store::db::open_in_memory_migrated;

#[test]
fn test_script_lines_emit_boundary_events() {
    let capture = init_test_capture();
    let conn = open_in_memory_migrated().unwrap();
    conn.execute_batch("DROP TABLE Authors;").unwrap();

    let report = run_script_text(&conn, "1|1|Ann|555|12\n1|3|Kim|1|40\n").unwrap();
    assert_eq!(report.store_failed, 1);

    capture.assert_event_exists("register_agent", EVENT_START);
    capture.assert_event_exists("register_agent", EVENT_END);

    let failed = capture
        .events_for_op("register_author")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(failed.field(FIELD_ERR_CODE), Some("ERR_PERSISTENCE"));

    let phones: Vec<_> = capture
        .events()
        .into_iter()
        .filter_map(|e| e.field("phone").map(str::to_string))
        .collect();
    assert!(!phones.is_empty());
    assert!(phones.iter().all(|p| p == "***REDACTED***"));

    // Per-line events carry the run's correlation id
    let run_id = report.run_id.to_string();
    let tagged = capture.count_events(|e| e.field("run_id") == Some(run_id.as_str()));
    assert!(tagged >= 2, "expected per-line events tagged with the run id");
}
