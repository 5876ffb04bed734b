//! Test utilities for generation pipeline tests.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse};

use std::sync::Arc;
use storycase_core::CompletionRequest;
use storycase_generation::{GenerationOptions, Orchestrator};
use storycase_models::{ModelInvoker, RetryPolicy};

/// Well-formed single case with two aligned steps.
#[allow(dead_code)]
pub const PASSWORD_RESET_CASE: &str = r#"[
  {
    "id": "TC-1",
    "title": "Verify password reset email is sent",
    "steps": ["Open the forgot password page", "Submit a registered email address"],
    "expected_results": ["The reset form is displayed", "A reset email is delivered"],
    "priority": "High"
  }
]"#;

/// Retry policy with millisecond-scale delays.
pub fn fast_policy(max_attempts: u32, attempt_timeout_ms: u64) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        attempt_timeout_ms,
    }
}

/// Orchestrator over `mock` with fast retries and default options.
#[allow(dead_code)]
pub fn orchestrator(mock: &MockDriver) -> Orchestrator {
    orchestrator_with(mock, GenerationOptions::default())
}

/// Orchestrator over `mock` with fast retries and custom options.
pub fn orchestrator_with(mock: &MockDriver, options: GenerationOptions) -> Orchestrator {
    let invoker = ModelInvoker::new(Arc::new(mock.clone()), fast_policy(3, 1_000));
    let template = CompletionRequest::builder()
        .prompt(String::new())
        .temperature(Some(0.2))
        .max_tokens(Some(1024))
        .build()
        .expect("Failed to build request template");
    Orchestrator::new(invoker, template, options)
}
