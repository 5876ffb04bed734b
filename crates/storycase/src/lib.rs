//! Storycase - generate QA test cases from user stories.
//!
//! A story goes through a deterministic prompt, a language model call with
//! bounded retry, a lenient parser, strict validation, and at most a
//! configured number of repair cycles. The result is either a validated
//! batch or a typed failure that tells the caller whether the input, the
//! provider, or the model's answer was at fault.
//!
//! # Quick Start
//!
//! ```no_run
//! use storycase::{CancellationToken, GenerateTestCasesRequest, StorycaseConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorycaseConfig::load(None)?;
//! let orchestrator = config.build_orchestrator()?;
//!
//! let request = GenerateTestCasesRequest {
//!     user_story: "As a user, I want to reset my password via email".to_string(),
//!     story_id: Some("JIRA-9".to_string()),
//!     project_key: Some("APP".to_string()),
//! };
//! let batch = orchestrator
//!     .generate_request(request, &CancellationToken::new())
//!     .await?;
//! println!("{} test cases", batch.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `storycase_error` - Error types
//! - `storycase_core` - Data types (stories, test cases, failures)
//! - `storycase_interface` - Traits at the seams (`ModelDriver`, `StorySource`, `TestCaseSink`)
//! - `storycase_models` - Provider drivers and the retrying invoker
//! - `storycase_generation` - Prompt, parser, validator, orchestrator
//!
//! This crate re-exports everything and adds configuration, logging, the
//! HTTP server and file-backed collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod export;
mod observability;
pub mod server;
mod stories;

pub use config::{ServerSettings, StorycaseConfig};
pub use export::JsonFileSink;
pub use observability::{ObservabilityConfig, init_observability};
pub use stories::JsonFileStorySource;

pub use storycase_core::*;
pub use storycase_error::*;
pub use storycase_generation::*;
pub use storycase_interface::*;
pub use storycase_models::*;
pub use tokio_util::sync::CancellationToken;
