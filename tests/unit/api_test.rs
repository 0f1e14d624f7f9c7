//! Tests for the operator API surface

use std::time::Duration;

use call_dispatch::core::{Dispatcher, DispatchError, DispatchOutcome, FixedServiceTime, SimulatedAgent};
use call_dispatch::infra::{InMemoryCallQueue, InMemoryHistory};
use call_dispatch::runtime::{execute, health, OperatorCommand, OperatorReply, TokioSpawner};
use call_dispatch::util::CallReason;

#[test]
fn test_health() {
    assert!(health().ok);
}

#[test]
fn test_command_json_shape() {
    let cmd: OperatorCommand = serde_json::from_str(
        r#"{ "command": "register", "customer": "Ana", "reason": "balance_inquiry" }"#,
    )
    .unwrap();
    assert_eq!(
        cmd,
        OperatorCommand::Register {
            customer: "Ana".into(),
            reason: CallReason::BalanceInquiry
        }
    );

    let dispatch: OperatorCommand = serde_json::from_str(r#"{ "command": "dispatch" }"#).unwrap();
    assert_eq!(dispatch, OperatorCommand::Dispatch);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_execute_commands() {
    let dispatcher = Dispatcher::new(
        1,
        InMemoryCallQueue::new(),
        InMemoryHistory::new(),
        SimulatedAgent::new(FixedServiceTime(Duration::from_millis(5))),
        TokioSpawner::current(),
    )
    .unwrap();

    let reply = execute(
        &dispatcher,
        OperatorCommand::Register {
            customer: "Ana".into(),
            reason: CallReason::Other("refund".into()),
        },
    )
    .unwrap();
    match reply {
        OperatorReply::Registered { call } => {
            assert_eq!(call.id, 1);
            assert_eq!(call.reason, "refund");
            assert!(call.finished_at.is_none());
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    let rejected = execute(
        &dispatcher,
        OperatorCommand::Register {
            customer: String::new(),
            reason: CallReason::BalanceInquiry,
        },
    );
    assert!(matches!(rejected, Err(DispatchError::Validation(_))));

    match execute(&dispatcher, OperatorCommand::Dispatch).unwrap() {
        OperatorReply::Dispatch { outcome, message } => {
            assert!(outcome.is_dispatching());
            assert_eq!(message, "dispatching Ana");
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    assert!(dispatcher.wait_idle_async(Duration::from_secs(2)).await);

    match execute(&dispatcher, OperatorCommand::ListHistory).unwrap() {
        OperatorReply::Calls { calls } => {
            assert_eq!(calls.len(), 1);
            assert!(calls[0].finished_at.is_some());
            assert!(calls[0].summary.contains("finished:"));
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    match execute(&dispatcher, OperatorCommand::Dispatch).unwrap() {
        OperatorReply::Dispatch { outcome, .. } => {
            assert_eq!(outcome, DispatchOutcome::NoCallsWaiting);
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    match execute(&dispatcher, OperatorCommand::Stats).unwrap() {
        OperatorReply::Stats { stats } => {
            assert_eq!(stats.registered, 1);
            assert_eq!(stats.completed, 1);
            assert_eq!(stats.available, 1);
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    let json = serde_json::to_value(execute(&dispatcher, OperatorCommand::ListPending).unwrap())
        .unwrap();
    assert_eq!(json["reply"], "calls");
    assert_eq!(json["calls"].as_array().unwrap().len(), 0);
}
