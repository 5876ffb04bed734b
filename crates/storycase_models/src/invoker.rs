//! Retrying invocation of a model driver.
//!
//! Each attempt runs under its own wall-clock timeout. Transient failures
//! (timeouts, connection errors, 408, 429, 5xx) are retried with capped
//! exponential backoff and jitter; anything else fails immediately.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use storycase_core::CompletionRequest;
use storycase_error::{ModelError, ModelErrorKind, ModelResult, RetryableError};
use storycase_interface::ModelDriver;
use tokio_retry2::strategy::{ExponentialFactorBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

/// Bounded retry policy for model calls.
///
/// `max_attempts` counts the first call, so the default of 3 allows two
/// retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff_ms: u64,
    /// Upper bound for any single delay
    pub max_backoff_ms: u64,
    /// Wall-clock budget for each attempt
    pub attempt_timeout_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
            attempt_timeout_ms: 60_000,
        }
    }
}

impl RetryPolicy {
    /// Delays between attempts: doubling from the initial backoff, capped,
    /// jittered, one fewer than `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        ExponentialFactorBackoff::from_millis(self.initial_backoff_ms, 2.0)
            .max_delay_millis(self.max_backoff_ms.max(1))
            .map(jitter)
            .take(retries)
    }

    /// Per-attempt timeout.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

/// Sends completion requests through a driver under a [`RetryPolicy`].
#[derive(Clone)]
pub struct ModelInvoker {
    driver: Arc<dyn ModelDriver>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ModelInvoker {
    /// Wrap a driver with a retry policy.
    pub fn new(driver: Arc<dyn ModelDriver>, policy: RetryPolicy) -> Self {
        Self { driver, policy }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &Arc<dyn ModelDriver> {
        &self.driver
    }

    /// The active retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send one completion request, retrying transient failures.
    ///
    /// Returns the raw model text. When every attempt fails transiently the
    /// error is [`ModelErrorKind::RetriesExhausted`]; non-transient errors
    /// are returned as-is after the attempt that produced them.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            max_attempts = self.policy.max_attempts
        )
    )]
    pub async fn invoke(&self, request: &CompletionRequest) -> ModelResult<String> {
        let attempts = AtomicU32::new(0);
        let attempts_ref = &attempts;
        let timeout = self.policy.attempt_timeout();

        let result = Retry::spawn(self.policy.delays(), || async move {
            let attempt = attempts_ref.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(attempt, "Invoking model");

            let outcome = match tokio::time::timeout(timeout, self.driver.complete(request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ModelError::new(ModelErrorKind::Timeout(
                    timeout.as_millis() as u64,
                ))),
            };

            match outcome {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() => {
                    warn!(attempt, error = %e, "Transient model error, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Permanent model error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await;

        let attempts = attempts.load(Ordering::SeqCst);
        match result {
            Ok(text) => {
                info!(attempts, chars = text.len(), "Model call succeeded");
                Ok(text)
            }
            Err(e) if e.is_retryable() => {
                warn!(attempts, error = %e, "Retries exhausted");
                Err(ModelError::new(ModelErrorKind::RetriesExhausted {
                    attempts,
                    last_error: e.kind.to_string(),
                }))
            }
            Err(e) => Err(e),
        }
    }
}
