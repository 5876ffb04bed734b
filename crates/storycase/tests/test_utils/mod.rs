//! Test utilities for the storycase facade.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storycase::{
    CompletionRequest, GenerationOptions, ModelDriver, ModelError, ModelErrorKind, ModelInvoker,
    ModelResult, Orchestrator, RetryPolicy,
};

/// Well-formed single case with two aligned steps.
#[allow(dead_code)]
pub const PASSWORD_RESET_CASE: &str = r#"[
  {
    "title": "Verify password reset email is sent",
    "steps": ["Open the forgot password page", "Submit a registered email address"],
    "expected_results": ["The reset form is displayed", "A reset email is delivered"],
    "priority": "High"
  }
]"#;

/// Mock driver replaying scripted results.
#[derive(Clone)]
pub struct MockDriver {
    responses: Arc<Vec<Result<String, ModelErrorKind>>>,
    call_count: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// Replay `responses` in order.
    pub fn new_sequence(responses: Vec<Result<String, ModelErrorKind>>) -> Self {
        Self {
            responses: Arc::new(responses),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Return the same text on every call.
    pub fn new_text(text: &str) -> Self {
        Self::new_sequence(vec![Ok(text.to_string()); 8])
    }

    /// Number of times complete() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ModelDriver for MockDriver {
    async fn complete(&self, _request: &CompletionRequest) -> ModelResult<String> {
        let current = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count - 1
        };
        match self.responses.get(current) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(kind)) => Err(ModelError::new(kind.clone())),
            None => Err(ModelError::new(ModelErrorKind::Configuration(
                "Mock sequence exhausted".to_string(),
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Orchestrator over `mock` with millisecond retries.
pub fn orchestrator(mock: &MockDriver) -> Orchestrator {
    let policy = RetryPolicy {
        max_attempts: 3,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        attempt_timeout_ms: 1_000,
    };
    Orchestrator::new(
        ModelInvoker::new(Arc::new(mock.clone()), policy),
        CompletionRequest::default(),
        GenerationOptions::default(),
    )
}
