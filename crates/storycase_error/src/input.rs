//! Caller input errors.

/// Specific reasons a story is rejected before any model call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum InputErrorKind {
    /// Story text is empty or whitespace only
    #[display("Story text must not be empty")]
    EmptyStoryText,
    /// Project key is required by the caller but missing or blank
    #[display("Project key is required but was empty")]
    MissingProjectKey,
}

/// Error for invalid caller-supplied stories.
///
/// # Examples
///
/// ```
/// use storycase_error::{InputError, InputErrorKind};
///
/// let err = InputError::new(InputErrorKind::EmptyStoryText);
/// assert!(format!("{}", err).contains("must not be empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Error: {} at line {} in {}", kind, line, file)]
pub struct InputError {
    /// The specific error condition
    pub kind: InputErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InputErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
