//! Core data types for the Storycase pipeline.
//!
//! This crate provides the types shared by every Storycase crate: the story
//! a caller submits, the test cases the pipeline returns, the typed failure
//! it returns instead, and the outbound completion request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod defect;
mod failure;
mod request;
mod story;
mod test_case;
mod tracker;

pub use defect::{DefectRecord, DefectSeverity, DefectStatus};
pub use failure::{FailureKind, GenerationFailure};
pub use request::{CompletionRequest, CompletionRequestBuilder, CompletionRequestBuilderError};
pub use story::{GenerateTestCasesRequest, GenerateTestCasesResponse, UserStory};
pub use test_case::{Priority, TestCase};
pub use tracker::StoryRecord;
