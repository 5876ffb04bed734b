//! Story source errors.

/// Conditions raised while loading stories from an issue-tracker export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// No story with the requested key
    #[display("Story '{}' not found", _0)]
    NotFound(String),
    /// Story file could not be read
    #[display("Failed to read stories: {}", _0)]
    Read(String),
    /// Story file content is not a list of story records
    #[display("Malformed story records: {}", _0)]
    Malformed(String),
}

/// Story source error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
