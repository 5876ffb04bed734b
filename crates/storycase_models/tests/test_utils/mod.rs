//! Test utilities for model invoker tests.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockResponse};

use storycase_core::CompletionRequest;
use storycase_models::RetryPolicy;

/// Request with a fixed prompt and no decoding overrides.
pub fn create_test_request(prompt: &str) -> CompletionRequest {
    CompletionRequest::builder()
        .prompt(prompt)
        .build()
        .expect("Failed to build test request")
}

/// Retry policy with millisecond-scale delays.
pub fn fast_policy(max_attempts: u32, attempt_timeout_ms: u64) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        attempt_timeout_ms,
    }
}
