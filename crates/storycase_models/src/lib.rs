//! Model provider integrations for Storycase.
//!
//! This crate owns the single network boundary of the pipeline:
//!
//! - [`OpenAiCompatibleClient`] - any `/v1/chat/completions` endpoint
//!   (OpenAI, Groq, local inference servers)
//! - [`GeminiClient`] - Google Generative Language `generateContent`
//! - [`ModelInvoker`] - per-attempt timeout and bounded exponential retry
//!   around any [`ModelDriver`](storycase_interface::ModelDriver)
//!
//! # Example
//!
//! ```no_run
//! use storycase_core::CompletionRequest;
//! use storycase_models::{ModelInvoker, ModelSettings, RetryPolicy};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ModelSettings::default();
//! let invoker = ModelInvoker::new(settings.build_driver()?, RetryPolicy::default());
//! let request = settings.decoding_template().with_prompt("Say hello");
//! let text = invoker.invoke(&request).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod http;
mod invoker;
mod openai_compat;
mod settings;

pub use gemini::{
    Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part,
};
pub use invoker::{ModelInvoker, RetryPolicy};
pub use openai_compat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage,
    OpenAiCompatibleClient, ResponseFormat, Usage,
};
pub use settings::{ModelSettings, Provider};
