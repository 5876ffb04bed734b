//! Retry and timeout behavior of the model invoker.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use storycase_error::ModelErrorKind;
use storycase_models::ModelInvoker;
use test_utils::{MockDriver, MockResponse, create_test_request, fast_policy};

fn unavailable() -> ModelErrorKind {
    ModelErrorKind::HttpError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    }
}

#[tokio::test]
async fn test_success_on_first_attempt() -> anyhow::Result<()> {
    let mock = MockDriver::new_sequence(vec![MockResponse::Text("[]".to_string())]);
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(3, 1_000));

    let text = invoker.invoke(&create_test_request("hello")).await?;

    assert_eq!(text, "[]");
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_recovers_after_transient_failures() -> anyhow::Result<()> {
    let mock = MockDriver::new_sequence(vec![
        MockResponse::Error(unavailable()),
        MockResponse::Error(ModelErrorKind::Connection("reset".to_string())),
        MockResponse::Text("ok".to_string()),
    ]);
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(3, 1_000));

    let text = invoker.invoke(&create_test_request("hello")).await?;

    assert_eq!(text, "ok");
    assert_eq!(mock.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_persistent_transient_failure_exhausts_retries() {
    let mock = MockDriver::new_error(unavailable());
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(3, 1_000));

    let err = invoker
        .invoke(&create_test_request("hello"))
        .await
        .unwrap_err();

    assert_eq!(mock.call_count(), 3);
    match err.kind {
        ModelErrorKind::RetriesExhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("503"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fatal_error_is_not_retried() {
    let mock = MockDriver::new_error(ModelErrorKind::HttpError {
        status_code: 401,
        message: "Invalid API key".to_string(),
    });
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(3, 1_000));

    let err = invoker
        .invoke(&create_test_request("hello"))
        .await
        .unwrap_err();

    assert_eq!(mock.call_count(), 1);
    assert!(matches!(
        err.kind,
        ModelErrorKind::HttpError {
            status_code: 401,
            ..
        }
    ));
}

#[tokio::test]
async fn test_slow_attempt_times_out_and_is_retried() -> anyhow::Result<()> {
    let mock = MockDriver::new_sequence(vec![
        MockResponse::Delay(Duration::from_secs(5), "too late".to_string()),
        MockResponse::Text("in time".to_string()),
    ]);
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(2, 50));

    let text = invoker.invoke(&create_test_request("hello")).await?;

    assert_eq!(text, "in time");
    assert_eq!(mock.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_every_attempt_timing_out_reports_timeout() {
    let mock = MockDriver::new_sequence(vec![
        MockResponse::Delay(Duration::from_secs(5), "late".to_string());
        2
    ]);
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(2, 20));

    let err = invoker
        .invoke(&create_test_request("hello"))
        .await
        .unwrap_err();

    assert_eq!(mock.call_count(), 2);
    match err.kind {
        ModelErrorKind::RetriesExhausted { last_error, .. } => {
            assert!(last_error.contains("timed out"), "{last_error}");
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}
