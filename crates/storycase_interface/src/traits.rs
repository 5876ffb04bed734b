//! Trait definitions for model providers and pipeline collaborators.

use async_trait::async_trait;
use storycase_core::{CompletionRequest, StoryRecord, TestCase, UserStory};
use storycase_error::{ModelResult, StorycaseResult};

/// Core trait that all model providers implement.
///
/// One call to [`ModelDriver::complete`] is one outbound request. Retry and
/// timeout policy live above this trait, in the invoker.
#[async_trait]
pub trait ModelDriver: Send + Sync {
    /// Send the request and return the model's text completion.
    async fn complete(&self, request: &CompletionRequest) -> ModelResult<String>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Source of stories, typically an issue tracker.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Fetch one story record by key.
    async fn fetch_story(&self, key: &str) -> StorycaseResult<StoryRecord>;

    /// List all available story records.
    async fn list_stories(&self) -> StorycaseResult<Vec<StoryRecord>>;
}

/// Destination for validated test case batches.
#[async_trait]
pub trait TestCaseSink: Send + Sync {
    /// Export a batch generated for `story`.
    async fn export(&self, story: &UserStory, test_cases: &[TestCase]) -> StorycaseResult<()>;
}
