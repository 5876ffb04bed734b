//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storycase binary.

mod commands;
mod generate;
mod serve;

pub use commands::{Cli, Commands, GenerateArgs, OutputFormat};
pub use generate::run_generate;
pub use serve::run_serve;
