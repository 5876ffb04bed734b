//! Scripted model driver that records what it was asked.

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

/// Mock driver replaying a response sequence.
///
/// Clones share state, so a test keeps one handle while the orchestrator
/// owns another.
#[derive(Clone)]
pub struct MockDriver {
    responses: Arc<Vec<MockResponse>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[allow(dead_code)]
impl MockDriver {
    /// Replay `responses` in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return the same text on every call.
    pub fn new_text(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockResponse::Text(text.into()); 8])
    }

    /// Number of times complete() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.prompt().clone())
            .collect()
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, request: &CompletionRequest) -> MockResponse {
        let mut requests = self.requests.lock().unwrap();
        let current = requests.len();
        requests.push(request.clone());
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
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<String> {
        match self.next_response(request) {
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
