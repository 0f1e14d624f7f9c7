//! Tests for builder modules

use std::time::Duration;

use call_dispatch::builders::{build_dispatcher, DispatcherBuilder};
use call_dispatch::config::{CallCenterConfig, ServiceTimeConfig};
use call_dispatch::core::{DispatchError, DispatchOutcome, SharedAuditSink};
use call_dispatch::runtime::TokioSpawner;
use call_dispatch::util::CallReason;

fn fast_config(agent_capacity: u32) -> CallCenterConfig {
    CallCenterConfig {
        agent_capacity,
        service_time: ServiceTimeConfig::Fixed { millis: 5 },
    }
}

#[test]
fn test_dispatcher_builder_accessors() {
    let builder = DispatcherBuilder::new("front-desk", fast_config(3));
    assert_eq!(builder.name(), "front-desk");
    assert_eq!(builder.config().agent_capacity, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_build_rejects_invalid_config() {
    let result = build_dispatcher(&fast_config(0), TokioSpawner::current());
    assert!(matches!(result, Err(DispatchError::Validation(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_built_dispatcher_runs_calls_to_completion() {
    let audit = SharedAuditSink::new(32);
    let dispatcher = DispatcherBuilder::new("front-desk", fast_config(2))
        .with_audit(Box::new(audit.clone()))
        .build(TokioSpawner::current())
        .unwrap();

    dispatcher.register_call("Ana", CallReason::BalanceInquiry).unwrap();
    assert!(dispatcher.dispatch_next().is_dispatching());
    assert_eq!(dispatcher.dispatch_next(), DispatchOutcome::NoCallsWaiting);
    assert!(dispatcher.wait_idle_async(Duration::from_secs(2)).await);

    assert_eq!(dispatcher.list_history().len(), 1);
    let actions: Vec<String> = audit.events().into_iter().map(|e| e.action).collect();
    assert_eq!(actions, vec!["register", "dispatch", "complete"]);
}
