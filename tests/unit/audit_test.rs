//! Tests for audit sink

use call_dispatch::core::{build_audit_event, AuditSink, InMemoryAuditSink, SharedAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(
        "1",
        Some("Ana".to_string()),
        "register",
        Some("balance inquiry".to_string()),
    );

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].call_id, "1");
    assert_eq!(events[0].action, "register");
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("1", None, "register", None));
    sink.record(build_audit_event("2", None, "register", None));
    sink.record(build_audit_event("3", None, "register", None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].call_id, "2"); // First one popped
    assert_eq!(events[1].call_id, "3");
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event("7", Some("Luis".into()), "complete", Some("technical issue".into()));

    assert_eq!(event.call_id, "7");
    assert_eq!(event.customer.as_deref(), Some("Luis"));
    assert_eq!(event.action, "complete");
    assert_eq!(event.payload, Some("technical issue".to_string()));
    assert!(event.created_at_ms > 0);
    assert_eq!(event.event_id.len(), 36);
}

#[test]
fn test_event_ids_are_unique() {
    let a = build_audit_event("1", None, "register", None);
    let b = build_audit_event("1", None, "register", None);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_shared_sink_clones_see_same_events() {
    let sink = SharedAuditSink::new(4);
    let mut writer = sink.clone();
    writer.record(build_audit_event("1", None, "dispatch", None));
    assert_eq!(sink.events().len(), 1);
}
