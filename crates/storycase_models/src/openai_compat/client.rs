use crate::http::{ensure_success, transport_error};
use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use async_trait::async_trait;
use storycase_core::CompletionRequest;
use storycase_error::{ModelError, ModelErrorKind, ModelResult};
use storycase_interface::ModelDriver;
use tracing::{debug, instrument};

const PROVIDER: &str = "openai";

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Cloning is cheap: the underlying `reqwest::Client` is a shared
/// connection pool.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    json_mode: bool,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .field("json_mode", &self.json_mode)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, model, api_key)
    }

    /// Create a client sharing an existing connection pool.
    #[instrument(skip(client, base_url, model, api_key))]
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        debug!("Creating OpenAI-compatible client");
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            json_mode: false,
        }
    }

    /// Request `json_object` output.
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Build the wire request for a completion.
    pub fn to_chat_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system() {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt().clone()));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: *request.max_tokens(),
            temperature: *request.temperature(),
            response_format: self.json_mode.then(ResponseFormat::json_object),
        }
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> ModelResult<ChatCompletionResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(url = %url, "Sending chat completion request");

        let mut req = self.client.post(&url).json(request);
        if let Some(api_key) = &self.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(transport_error)?;
        let response = ensure_success(PROVIDER, response).await?;
        let parsed: ChatCompletionResponse = response.json().await.map_err(transport_error)?;

        debug!(
            completion_id = %parsed.id,
            choices = parsed.choices.len(),
            "Chat completion successful"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl ModelDriver for OpenAiCompatibleClient {
    #[instrument(skip(self, request))]
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<String> {
        let response = self.chat_completion(&self.to_chat_request(request)).await?;
        response.first_text().map(str::to_string).ok_or_else(|| {
            ModelError::new(ModelErrorKind::Decode(
                "response contained no message content".to_string(),
            ))
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
