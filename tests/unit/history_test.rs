//! Tests for wait-line and history backends

use call_dispatch::core::{CallHistory, CallQueue, CallRecord};
use call_dispatch::infra::{InMemoryCallQueue, InMemoryHistory};
use call_dispatch::util::CallReason;

fn make_call(id: u64, customer: &str) -> CallRecord {
    CallRecord::new(id, customer, CallReason::ProductInfo).unwrap()
}

#[test]
fn test_queue_then_history_flow() {
    let mut queue = InMemoryCallQueue::new();
    let mut history = InMemoryHistory::new();

    queue.enqueue(make_call(1, "Ana"));
    queue.enqueue(make_call(2, "Luis"));

    while let Some(call) = queue.dequeue_if_any() {
        history.append(call);
    }

    assert!(queue.is_empty());
    let names: Vec<String> = history
        .snapshot()
        .iter()
        .map(|c| c.customer().to_string())
        .collect();
    assert_eq!(names, vec!["Ana", "Luis"]);
}

#[test]
fn test_history_snapshot_is_stable() {
    let mut history = InMemoryHistory::new();
    history.append(make_call(1, "Ana"));
    let first = history.snapshot();
    let second = history.snapshot();
    assert_eq!(first, second);
    assert_eq!(history.len(), 1);
    assert!(history.for_customer("Luis").is_empty());
}
