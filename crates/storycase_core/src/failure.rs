//! Typed generation failures returned to callers.

use serde::{Deserialize, Serialize};

/// Failure taxonomy visible to callers.
///
/// Each kind calls for a different user action: fix the input, wait for the
/// provider, or retry/rephrase because the model answer was unusable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
pub enum FailureKind {
    /// Empty or malformed story, rejected before any network call
    #[display("InvalidInput")]
    InvalidInput,
    /// Transient provider failure; retried internally, escalated to
    /// [`FailureKind::UpstreamUnavailable`] when the budget runs out
    #[display("UpstreamTransient")]
    UpstreamTransient,
    /// Retry budget exhausted or fatal provider rejection
    #[display("UpstreamUnavailable")]
    UpstreamUnavailable,
    /// Model output contained no usable structured data
    #[display("ParseFailure")]
    ParseFailure,
    /// Model output parsed but violates test case invariants
    #[display("ValidationFailure")]
    ValidationFailure,
    /// Caller abandoned the request
    #[display("Cancelled")]
    Cancelled,
}

impl FailureKind {
    /// Whether the failure was caused by the model's answer rather than the
    /// input or the transport.
    pub fn is_unusable_output(&self) -> bool {
        matches!(self, FailureKind::ParseFailure | FailureKind::ValidationFailure)
    }
}

/// A classified, terminal generation failure.
///
/// # Examples
///
/// ```
/// use storycase_core::{FailureKind, GenerationFailure};
///
/// let failure = GenerationFailure::new(FailureKind::InvalidInput, "Story text must not be empty");
/// assert!(failure.raw_model_output.is_none());
/// assert_eq!(failure.to_string(), "InvalidInput: Story text must not be empty");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display, derive_more::Error,
)]
#[display("{}: {}", kind, message)]
pub struct GenerationFailure {
    /// Classification
    pub kind: FailureKind,
    /// Human-readable description
    pub message: String,
    /// Last raw model output, attached for parse/validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_model_output: Option<String>,
}

impl GenerationFailure {
    /// Create a failure without raw output.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw_model_output: None,
        }
    }

    /// Attach the raw model output for diagnostics.
    pub fn with_raw_output(mut self, raw: impl Into<String>) -> Self {
        self.raw_model_output = Some(raw.into());
        self
    }
}
