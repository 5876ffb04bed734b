//! Google Gemini REST client.
//!
//! Talks to `{base_url}/v1beta/models/{model}:generateContent` with the API
//! key in the `x-goog-api-key` header. Model names may be given with or
//! without the `models/` prefix.

use crate::http::{ensure_success, transport_error};
use crate::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use async_trait::async_trait;
use storycase_core::CompletionRequest;
use storycase_error::{ModelError, ModelErrorKind, ModelResult};
use storycase_interface::ModelDriver;
use tracing::{debug, instrument};

const PROVIDER: &str = "gemini";

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    json_mode: bool,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("json_mode", &self.json_mode)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with its own connection pool.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, model, api_key)
    }

    /// Create a client sharing an existing connection pool.
    #[instrument(name = "gemini_client_new", skip_all)]
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        debug!("Creating Gemini client");
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            json_mode: false,
        }
    }

    /// Request `application/json` output.
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    /// Endpoint for the configured model.
    ///
    /// - "gemini-2.0-flash" → `.../v1beta/models/gemini-2.0-flash:generateContent`
    /// - "models/gemini-2.0-flash" → same URL (prefix preserved, not doubled)
    pub fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Build the wire request for a completion.
    pub fn to_generate_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(request.prompt().clone())],
            system_instruction: request.system().as_ref().map(|s| Content::text(s.clone())),
            generation_config: Some(GenerationConfig {
                temperature: *request.temperature(),
                max_output_tokens: *request.max_tokens(),
                response_mime_type: self.json_mode.then(|| "application/json".to_string()),
            }),
        }
    }

    /// Send a `generateContent` request.
    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> ModelResult<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_success(PROVIDER, response).await?;
        let parsed: GenerateContentResponse = response.json().await.map_err(transport_error)?;

        debug!(candidates = parsed.candidates.len(), "Received Gemini response");
        Ok(parsed)
    }
}

#[async_trait]
impl ModelDriver for GeminiClient {
    #[instrument(skip(self, request))]
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<String> {
        let response = self
            .generate_content(&self.to_generate_request(request))
            .await?;
        response.first_text().ok_or_else(|| {
            ModelError::new(ModelErrorKind::Decode(
                "response contained no candidate text (prompt may have been blocked)".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_handles_models_prefix() {
        let plain = GeminiClient::new("https://example.test", "gemini-2.0-flash", "k");
        let prefixed = GeminiClient::new("https://example.test", "models/gemini-2.0-flash", "k");
        assert_eq!(plain.endpoint(), prefixed.endpoint());
        assert_eq!(
            plain.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new("https://example.test", "gemini-2.0-flash", "secret-key");
        assert!(!format!("{client:?}").contains("secret-key"));
    }
}
