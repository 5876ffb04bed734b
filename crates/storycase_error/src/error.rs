//! Top-level error wrapper types.

use crate::{
    ConfigError, ExportError, InputError, JsonError, ModelError, ParseError, StoryError,
    ValidationError,
};

/// Every error condition in the workspace.
///
/// # Examples
///
/// ```
/// use storycase_error::{StorycaseError, ConfigError};
///
/// let err: StorycaseError = ConfigError::new("bad provider").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorycaseErrorKind {
    /// Invalid caller input
    #[from(InputError)]
    Input(InputError),
    /// Model provider error
    #[from(ModelError)]
    Model(ModelError),
    /// Model output could not be parsed
    #[from(ParseError)]
    Parse(ParseError),
    /// Parsed output violates batch invariants
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Story source error
    #[from(StoryError)]
    Story(StoryError),
    /// Export sink error
    #[from(ExportError)]
    Export(ExportError),
}

/// Storycase error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storycase_error::{StorycaseResult, ConfigError};
///
/// fn might_fail() -> StorycaseResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storycase Error: {}", _0)]
pub struct StorycaseError(Box<StorycaseErrorKind>);

impl StorycaseError {
    /// Create a new error from a kind.
    pub fn new(kind: StorycaseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorycaseErrorKind {
        &self.0
    }
}

impl<T> From<T> for StorycaseError
where
    T: Into<StorycaseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storycase operations.
pub type StorycaseResult<T> = std::result::Result<T, StorycaseError>;
