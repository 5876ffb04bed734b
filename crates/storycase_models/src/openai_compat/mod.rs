//! OpenAI-compatible chat completions driver.

mod client;
mod dto;

pub use client::OpenAiCompatibleClient;
pub use dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage,
    ResponseFormat, Usage,
};
