//! Model provider errors and retry classification.

/// Model provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// API key environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Connection could not be established or was reset
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// Attempt exceeded its wall-clock budget
    #[display("Request timed out after {}ms", _0)]
    Timeout(u64),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Response envelope could not be decoded
    #[display("Failed to decode provider response: {}", _0)]
    Decode(String),
    /// Provider or driver misconfiguration
    #[display("Invalid model configuration: {}", _0)]
    Configuration(String),
    /// Every allowed attempt failed with a transient error
    #[display("Gave up after {} attempts, last error: {}", attempts, last_error)]
    RetriesExhausted {
        /// Attempts made
        attempts: u32,
        /// Display form of the final transient error
        last_error: String,
    },
}

impl ModelErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Connection failures, timeouts, 408, 429 and 5xx are transient.
    /// Other 4xx responses (auth, quota, malformed request) are fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429) || (500..600).contains(status_code)
            }
            ModelErrorKind::Connection(_) => true,
            ModelErrorKind::Timeout(_) => true,
            _ => false,
        }
    }
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use storycase_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let err = ModelError::new(ModelErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = ModelError::new(ModelErrorKind::HttpError {
///     status_code: 401,
///     message: "Invalid API key".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at {}:{}", kind, file, line)]
pub struct ModelError {
    /// The specific error kind
    pub kind: ModelErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new model error.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable), 429 (rate limit),
/// or network timeouts return true. Permanent errors like 401
/// (unauthorized) or 400 (bad request) return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
