//! Scripted model driver for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storycase_core::CompletionRequest;
use storycase_error::{ModelError, ModelErrorKind, ModelResult};
use storycase_interface::ModelDriver;

/// A single scripted response.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with this error
    Error(ModelErrorKind),
    /// Sleep this long, then return the text
    Delay(Duration, String),
}

/// Mock driver that replays a sequence of responses.
///
/// Clones share the call counter, so a test can keep one handle and give
/// another to the invoker.
#[derive(Clone)]
pub struct MockDriver {
    responses: Arc<Vec<MockResponse>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockDriver {
    /// Replay `responses` in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fail with the same error.
    #[allow(dead_code)]
    pub fn new_error(kind: ModelErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(kind); 16])
    }

    /// Number of times complete() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn next_response(&self) -> MockResponse {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;
        self.responses.get(current).cloned().unwrap_or_else(|| {
            MockResponse::Error(ModelErrorKind::Configuration(format!(
                "Mock sequence exhausted (call {} beyond {} responses)",
                current + 1,
                self.responses.len()
            )))
        })
    }
}

#[async_trait]
impl ModelDriver for MockDriver {
    async fn complete(&self, _request: &CompletionRequest) -> ModelResult<String> {
        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Error(kind) => Err(ModelError::new(kind)),
            MockResponse::Delay(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
