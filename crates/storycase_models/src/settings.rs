//! Provider selection and decoding settings.

use crate::{GeminiClient, OpenAiCompatibleClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storycase_core::CompletionRequest;
use storycase_error::{ModelError, ModelErrorKind, ModelResult};
use storycase_interface::ModelDriver;
use tracing::{debug, instrument};

/// Supported model providers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    /// OpenAI or any OpenAI-compatible chat completions endpoint
    #[default]
    OpenAi,
    /// Google Gemini
    Gemini,
}

impl Provider {
    /// Default API base URL.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    /// Default environment variable holding the API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Model provider configuration (`[model]` section).
///
/// Decoding settings are fixed for the lifetime of the process so that every
/// attempt of a request, including repair calls, uses the same configuration.
///
/// ```toml
/// [model]
/// provider = "gemini"
/// model = "gemini-2.0-flash"
/// temperature = 0.2
/// max_tokens = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Which provider protocol to speak
    pub provider: Provider,
    /// API base URL (provider default when unset)
    pub base_url: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Environment variable holding the API key (provider default when unset)
    pub api_key_env: Option<String>,
    /// Ask the provider for a JSON-only response when it supports it
    pub json_mode: bool,
    /// Optional system instruction sent with every request
    pub system_prompt: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            temperature: Some(0.2),
            max_tokens: Some(4096),
            api_key_env: None,
            json_mode: false,
            system_prompt: None,
        }
    }
}

impl ModelSettings {
    /// Effective base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    /// Effective API key environment variable name.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    /// Request carrying the fixed decoding settings and an empty prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use storycase_models::ModelSettings;
    ///
    /// let settings = ModelSettings::default();
    /// let request = settings.decoding_template().with_prompt("hello");
    /// assert_eq!(request.temperature(), &settings.temperature);
    /// ```
    pub fn decoding_template(&self) -> CompletionRequest {
        CompletionRequest::builder()
            .system(self.system_prompt.clone())
            .prompt(String::new())
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .unwrap_or_default()
    }

    /// Construct the configured driver.
    ///
    /// The API key is read from the environment here, once. Gemini requires
    /// a key; OpenAI-compatible endpoints may run without one (local servers).
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::MissingApiKey`] when a required key is unset.
    #[instrument(skip(self), fields(provider = %self.provider, model = %self.model))]
    pub fn build_driver(&self) -> ModelResult<Arc<dyn ModelDriver>> {
        let api_key = std::env::var(self.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty());
        let http = reqwest::Client::new();

        debug!(has_api_key = api_key.is_some(), "Building model driver");

        match self.provider {
            Provider::OpenAi => Ok(Arc::new(
                OpenAiCompatibleClient::with_http_client(
                    http,
                    self.base_url(),
                    self.model.clone(),
                    api_key,
                )
                .with_json_mode(self.json_mode),
            )),
            Provider::Gemini => {
                let api_key = api_key.ok_or_else(|| {
                    ModelError::new(ModelErrorKind::MissingApiKey(self.api_key_env().to_string()))
                })?;
                Ok(Arc::new(
                    GeminiClient::with_http_client(http, self.base_url(), self.model.clone(), api_key)
                        .with_json_mode(self.json_mode),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::from_str("OpenAI").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_str("gemini").unwrap(), Provider::Gemini);
        assert_eq!(Provider::OpenAi.to_string(), "openai");
    }

    #[test]
    fn test_base_url_defaults_and_trims() {
        let mut settings = ModelSettings::default();
        assert_eq!(settings.base_url(), "https://api.openai.com");

        settings.base_url = Some("http://localhost:8080/".to_string());
        assert_eq!(settings.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let settings = ModelSettings {
            provider: Provider::Gemini,
            api_key_env: Some("STORYCASE_TEST_UNSET_GEMINI_KEY".to_string()),
            ..Default::default()
        };
        let err = settings.build_driver().err().unwrap();
        assert!(matches!(err.kind, ModelErrorKind::MissingApiKey(_)));
    }

    #[test]
    fn test_openai_compatible_runs_without_key() {
        let settings = ModelSettings {
            base_url: Some("http://localhost:8080".to_string()),
            model: "local-model".to_string(),
            api_key_env: Some("STORYCASE_TEST_UNSET_OPENAI_KEY".to_string()),
            ..Default::default()
        };
        let driver = settings.build_driver().unwrap();
        assert_eq!(driver.provider_name(), "openai");
        assert_eq!(driver.model_name(), "local-model");
    }
}
