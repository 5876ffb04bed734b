//! Batch validation errors.

/// Test-case batch invariants, one variant per rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Response contained no test cases
    #[display("batch contains no test cases")]
    EmptyBatch,
    /// A case has an empty title
    #[display("test case {} has an empty title", index)]
    EmptyTitle {
        /// Zero-based position of the case
        index: usize,
    },
    /// A case has no steps
    #[display("test case {} has no steps", index)]
    NoSteps {
        /// Zero-based position of the case
        index: usize,
    },
    /// A step is blank after trimming
    #[display("test case {} has a blank step at position {}", index, step)]
    BlankStep {
        /// Zero-based position of the case
        index: usize,
        /// Zero-based position of the step
        step: usize,
    },
    /// An expected result is blank after trimming
    #[display("test case {} has a blank expected result at position {}", index, step)]
    BlankExpectedResult {
        /// Zero-based position of the case
        index: usize,
        /// Zero-based position of the step it belongs to
        step: usize,
    },
    /// Steps and expected results are not index-aligned
    #[display(
        "test case {} has {} steps but {} expected results; counts must match",
        index,
        steps,
        expected_results
    )]
    StepCountMismatch {
        /// Zero-based position of the case
        index: usize,
        /// Number of steps
        steps: usize,
        /// Number of expected results
        expected_results: usize,
    },
    /// Two cases share an id
    #[display("duplicate test case id '{}'", _0)]
    DuplicateId(String),
    /// More cases than the configured cap
    #[display("batch has {} test cases, at most {} allowed", count, max)]
    TooManyCases {
        /// Cases returned
        count: usize,
        /// Configured cap
        max: usize,
    },
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storycase_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::StepCountMismatch {
///     index: 0,
///     steps: 3,
///     expected_results: 2,
/// });
/// assert!(format!("{}", err).contains("counts must match"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The specific rule that failed
    pub kind: ValidationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
