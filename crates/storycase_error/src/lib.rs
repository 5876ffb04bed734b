//! Error types for the Storycase library.
//!
//! This crate provides the foundation error types used throughout the Storycase workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storycase_error::{InputError, InputErrorKind, StorycaseResult};
//!
//! fn read_story(text: &str) -> StorycaseResult<&str> {
//!     if text.trim().is_empty() {
//!         Err(InputError::new(InputErrorKind::EmptyStoryText))?
//!     }
//!     Ok(text)
//! }
//!
//! assert!(read_story("   ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod input;
mod json;
mod model;
mod parse;
mod story;
mod validation;

pub use config::ConfigError;
pub use error::{StorycaseError, StorycaseErrorKind, StorycaseResult};
pub use export::ExportError;
pub use input::{InputError, InputErrorKind};
pub use json::JsonError;
pub use model::{ModelError, ModelErrorKind, ModelResult, RetryableError};
pub use parse::{ParseError, ParseErrorKind};
pub use story::{StoryError, StoryErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
