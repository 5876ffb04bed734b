//! Test case generation pipeline for Storycase.
//!
//! Turns a [`UserStory`](storycase_core::UserStory) into a validated
//! [`TestCaseBatch`]:
//!
//! - [`build`] - deterministic prompt construction
//! - [`parse`] - lenient extraction of cases from free-form model text
//! - [`validate`] - schema rules and id assignment
//! - [`Orchestrator`] - the state machine tying them to a
//!   [`ModelInvoker`](storycase_models::ModelInvoker), with a bounded repair
//!   cycle and cancellation
//!
//! # Example
//!
//! ```no_run
//! use storycase_core::UserStory;
//! use storycase_generation::{GenerationOptions, Orchestrator};
//! use storycase_models::{ModelInvoker, ModelSettings, RetryPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ModelSettings::default();
//! let invoker = ModelInvoker::new(settings.build_driver()?, RetryPolicy::default());
//! let orchestrator = Orchestrator::new(
//!     invoker,
//!     settings.decoding_template(),
//!     GenerationOptions::default(),
//! );
//!
//! let story = UserStory::new("APP-1", "As a user, I want to reset my password via email", None);
//! let batch = orchestrator.generate(&story, &CancellationToken::new()).await?;
//! for case in &batch {
//!     println!("{}: {}", case.id(), case.title());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod options;
mod orchestrator;
mod parser;
pub mod prompt;
mod validator;

pub use options::{GenerationOptions, MAX_REPAIR_ATTEMPTS};
pub use orchestrator::{GenerationResult, GenerationState, Orchestrator};
pub use parser::{CandidateCase, ParsedCandidate, extract_json, parse};
pub use prompt::{DEFAULT_REPAIR_TEMPLATE, Prompt, PromptOptions, PromptOptionsBuilder, build, build_repair};
pub use validator::{TestCaseBatch, validate, validate_with_limit};
