//! Trait definitions for the Storycase pipeline.
//!
//! The generation pipeline touches the outside world at three seams:
//! - [`ModelDriver`] - the single network boundary to a model provider
//! - [`StorySource`] - where stories come from (issue trackers, exports)
//! - [`TestCaseSink`] - where validated batches go (files, spreadsheets)
//!
//! Tests substitute deterministic implementations at each seam.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ModelDriver, StorySource, TestCaseSink};
