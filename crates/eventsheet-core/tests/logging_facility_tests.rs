#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{event_item, flat_events, nested_chain};
use eventsheet_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_REJECTED, EVENT_START};
use eventsheet_core::logging_facility::test_capture::init_test_capture;
use eventsheet_core::ops::event_ops;
use eventsheet_core::{log_op_end, log_op_error, log_op_rejected, log_op_start};
use eventsheet_core::{EditorSelection, SheetError};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, selected_len = 3usize);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert!(events[0].is(op_name, EVENT_START));
    assert_eq!(events[0].field("selected_len"), Some("3"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.count_events(|e| e.is(op_name, EVENT_END));
    assert_eq!(end_events, 1, "Should have exactly one end event");
    assert_eq!(
        capture.events_for_op(op_name)[0].field("duration_ms"),
        Some("42")
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SheetError::EventCycle {
        event_id: "e1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert!(events[0].is(op_name, EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_CYCLE_DETECTED"));
    assert_eq!(events[0].level, tracing::Level::WARN);
}

#[test]
fn test_log_op_rejected_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_rejected_unique_4";

    log_op_rejected!(op_name, "stale locator", position = 7usize);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert!(events[0].is(op_name, EVENT_REJECTED));
    assert_eq!(events[0].field("reason"), Some("stale locator"));
    assert_eq!(events[0].field("position"), Some("7"));
}

// ===== OPERATIONS =====
//
// The capture buffer is shared by every test in this binary, so the
// assertions below look for events carrying this test's own ids.

#[test]
fn test_successful_drop_logs_start_and_end() {
    let capture = init_test_capture();
    let (mut store, ids) = flat_events(3);
    let mut selection: EditorSelection = EditorSelection::default();
    selection.add_event(&store, event_item(&store, ids[1]));
    selection.add_event(&store, event_item(&store, ids[2]));
    selection.set_highlighted_event(Some(event_item(&store, ids[0])));

    selection.begin_drag_event();
    selection.end_drag_event(&mut store).unwrap();

    capture.assert_event_exists("end_drag_event", EVENT_START);
    let ends = capture.count_events(|e| {
        e.is("end_drag_event", EVENT_END) && e.field("inserted_len") == Some("2")
    });
    assert!(ends >= 1);
}

#[test]
fn test_cycle_rejection_logs_end_error() {
    let capture = init_test_capture();
    let (mut store, a, b, _) = nested_chain();
    let mut selection: EditorSelection = EditorSelection::default();
    selection.add_event(&store, event_item(&store, a));
    selection.set_highlighted_event(Some(event_item(&store, b)));

    selection.begin_drag_event();
    let result = selection.end_drag_event(&mut store);

    assert!(result.is_err());
    let errors = capture.count_events(|e| {
        e.is("end_drag_event", EVENT_END_ERROR) && e.field("err.code") == Some("ERR_CYCLE_DETECTED")
    });
    assert!(errors >= 1);
}

#[test]
fn test_stale_add_logs_rejection() {
    let capture = init_test_capture();
    let (mut store, ids) = flat_events(1);
    let stale = event_item(&store, ids[0]);
    event_ops::remove_event(&mut store, &ids[0]).unwrap();
    let mut selection: EditorSelection = EditorSelection::default();

    selection.add_event(&store, stale);

    let stale_id = ids[0].to_string();
    let rejected = capture.count_events(|e| {
        e.is("add_event", EVENT_REJECTED) && e.field("event_id") == Some(stale_id.as_str())
    });
    assert_eq!(rejected, 1);
}
