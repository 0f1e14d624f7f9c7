//! Tests for error types

use call_dispatch::core::DispatchError;

#[test]
fn test_validation_error() {
    let err = DispatchError::Validation("customer name must not be empty".to_string());
    assert_eq!(
        format!("{}", err),
        "validation failed: customer name must not be empty"
    );
}

#[test]
fn test_invariant_violation_error() {
    let err = DispatchError::InvariantViolation("agent released twice".to_string());
    assert_eq!(format!("{}", err), "invariant violated: agent released twice");
}

#[test]
fn test_config_error() {
    let err = DispatchError::Config("parse error".to_string());
    assert_eq!(format!("{}", err), "config error: parse error");
}

#[test]
fn test_converts_into_anyhow() {
    fn fails() -> call_dispatch::core::AppResult<()> {
        Err(DispatchError::Validation("bad".into()))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(err.downcast_ref::<DispatchError>().is_some());
}
