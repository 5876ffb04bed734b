//! Generation state machine.
//!
//! ```text
//! Building → Invoking → Parsing → Validating → Done
//!                ↑          │          │
//!                └─ Repairing ←────────┘ (while repair budget remains)
//! ```
//!
//! Any state may end in `Failed`. Building failures never reach the network;
//! invocation failures are terminal (the invoker already retried); parse and
//! validation failures consume the repair budget before becoming terminal.

use crate::prompt::{self, Prompt};
use crate::{GenerationOptions, TestCaseBatch, parse, validate_with_limit};
use storycase_core::{
    CompletionRequest, FailureKind, GenerateTestCasesRequest, GenerationFailure, UserStory,
};
use storycase_error::{ModelError, ModelErrorKind};
use storycase_models::ModelInvoker;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Outcome of one generation request.
pub type GenerationResult = Result<TestCaseBatch, GenerationFailure>;

/// States of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GenerationState {
    /// Building the prompt
    Building,
    /// Waiting on the model
    Invoking,
    /// Extracting candidate cases
    Parsing,
    /// Checking candidate cases
    Validating,
    /// Building a repair prompt
    Repairing,
    /// Batch ready
    Done,
    /// Terminal failure
    Failed,
}

/// Drives one story through prompt, model, parser and validator.
///
/// Cheap to clone; clones share the driver and its connection pool.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    invoker: ModelInvoker,
    options: GenerationOptions,
    template: CompletionRequest,
}

impl Orchestrator {
    /// Create an orchestrator.
    ///
    /// `template` carries the decoding settings; its prompt is replaced on
    /// every call.
    pub fn new(invoker: ModelInvoker, template: CompletionRequest, options: GenerationOptions) -> Self {
        Self {
            invoker,
            options,
            template,
        }
    }

    /// Active options.
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Underlying invoker.
    pub fn invoker(&self) -> &ModelInvoker {
        &self.invoker
    }

    /// Generate test cases for an API request body.
    pub async fn generate_request(
        &self,
        request: GenerateTestCasesRequest,
        cancel: &CancellationToken,
    ) -> GenerationResult {
        let story = request.into_user_story();
        self.generate(&story, cancel).await
    }

    /// Generate a validated batch for `story`.
    ///
    /// Makes at most `1 + repair budget` model calls. Cancelling `cancel`
    /// aborts the in-flight call, including its backoff sleeps.
    #[instrument(skip(self, story, cancel), fields(story_id = %story.id()))]
    pub async fn generate(&self, story: &UserStory, cancel: &CancellationToken) -> GenerationResult {
        let mut state = GenerationState::Building;
        debug!(%state, "Generation started");

        let original = match prompt::build(story, &self.options.prompt_options()) {
            Ok(prompt) => prompt,
            Err(e) => {
                transition(&mut state, GenerationState::Failed);
                warn!(error = %e.kind, "Rejected story input");
                return Err(GenerationFailure::new(
                    FailureKind::InvalidInput,
                    format!("Invalid input: {}", e.kind),
                ));
            }
        };

        let mut current: Prompt = original.clone();
        let mut repairs_left = self.options.repair_budget();
        let mut calls = 0u32;

        loop {
            transition(&mut state, GenerationState::Invoking);
            let request = self.template.with_prompt(current.as_str());
            calls += 1;

            let raw = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    transition(&mut state, GenerationState::Failed);
                    info!(calls, "Generation cancelled");
                    return Err(GenerationFailure::new(
                        FailureKind::Cancelled,
                        "Generation was cancelled by the caller",
                    ));
                }
                result = self.invoker.invoke(&request) => result,
            };
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    transition(&mut state, GenerationState::Failed);
                    warn!(calls, error = %e.kind, "Model invocation failed");
                    return Err(upstream_failure(&e));
                }
            };

            transition(&mut state, GenerationState::Parsing);
            let (kind, problem) = match parse(&raw) {
                Err(e) => (FailureKind::ParseFailure, e.kind.to_string()),
                Ok(candidate) => {
                    transition(&mut state, GenerationState::Validating);
                    match validate_with_limit(candidate, self.options.max_test_cases) {
                        Ok(batch) => {
                            transition(&mut state, GenerationState::Done);
                            info!(calls, cases = batch.len(), "Generation succeeded");
                            return Ok(batch);
                        }
                        Err(e) => (FailureKind::ValidationFailure, e.kind.to_string()),
                    }
                }
            };

            if repairs_left == 0 {
                transition(&mut state, GenerationState::Failed);
                warn!(calls, %kind, %problem, "Model output unusable, repair budget spent");
                return Err(GenerationFailure::new(
                    kind,
                    format!("The model returned an unusable answer: {problem}"),
                )
                .with_raw_output(raw));
            }
            repairs_left -= 1;

            transition(&mut state, GenerationState::Repairing);
            debug!(%kind, %problem, repairs_left, "Requesting repair");
            current =
                prompt::render_repair(self.options.repair_template(), &original, &problem, &raw);
        }
    }
}

fn transition(state: &mut GenerationState, next: GenerationState) {
    debug!(from = %state, to = %next, "State transition");
    *state = next;
}

fn upstream_failure(error: &ModelError) -> GenerationFailure {
    let message = match &error.kind {
        ModelErrorKind::RetriesExhausted { .. } => {
            format!("The model provider is unavailable: {}", error.kind)
        }
        ModelErrorKind::MissingApiKey(_) | ModelErrorKind::Configuration(_) => {
            format!("The model provider is misconfigured: {}", error.kind)
        }
        _ => format!("The model provider rejected the request: {}", error.kind),
    };
    GenerationFailure::new(FailureKind::UpstreamUnavailable, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_messages_distinguish_causes() {
        let exhausted = ModelError::new(ModelErrorKind::RetriesExhausted {
            attempts: 3,
            last_error: "HTTP 503 error: busy".to_string(),
        });
        let failure = upstream_failure(&exhausted);
        assert_eq!(failure.kind, FailureKind::UpstreamUnavailable);
        assert!(failure.message.contains("unavailable"));
        assert!(failure.message.contains("3 attempts"));

        let rejected = ModelError::new(ModelErrorKind::HttpError {
            status_code: 401,
            message: "bad key".to_string(),
        });
        assert!(upstream_failure(&rejected).message.contains("rejected"));
    }

    #[test]
    fn test_state_names() {
        assert_eq!(GenerationState::Repairing.to_string(), "Repairing");
    }
}
