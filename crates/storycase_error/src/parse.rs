//! Response parsing errors.

/// Reasons a raw model response could not be turned into a candidate batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// No structured data could be extracted
    #[display("unparseable: no JSON test case data found in response")]
    Unparseable,
    /// Structured data was found but is not a test case list or object
    #[display("unexpected JSON shape: {}", _0)]
    UnexpectedShape(String),
    /// A required field is missing from a case
    #[display("test case {} is missing required field '{}'", index, field)]
    MissingField {
        /// Zero-based position of the case in the response
        index: usize,
        /// Field name
        field: &'static str,
    },
    /// A field is present but has the wrong type
    #[display("test case {} has invalid '{}': {}", index, field, reason)]
    InvalidField {
        /// Zero-based position of the case in the response
        index: usize,
        /// Field name
        field: &'static str,
        /// What was wrong
        reason: String,
    },
}

/// Parse error with location tracking.
///
/// # Examples
///
/// ```
/// use storycase_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::MissingField { index: 0, field: "title" });
/// assert!(format!("{}", err).contains("'title'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The specific error condition
    pub kind: ParseErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
