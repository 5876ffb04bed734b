//! Outbound completion request.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single-prompt completion request with fixed decoding settings.
///
/// Every attempt of one generation request (transient retries and the repair
/// call) is sent with the same decoding settings.
///
/// # Examples
///
/// ```
/// use storycase_core::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .prompt("Write test cases")
///     .temperature(Some(0.2))
///     .max_tokens(Some(2048))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "Write test cases");
/// assert_eq!(*request.max_tokens(), Some(2048));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Optional system instruction
    #[builder(default)]
    system: Option<String>,
    /// The user prompt
    prompt: String,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Start building a request.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// Same decoding settings, different prompt.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }
}
