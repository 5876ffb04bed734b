//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storycase - generate QA test cases from user stories
#[derive(Parser, Debug)]
#[command(name = "storycase")]
#[command(about = "Generate QA test cases from user stories with a language model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate test cases for one story
    Generate(GenerateArgs),

    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides `[server] bind`)
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Arguments of `storycase generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Story text
    #[arg(long, required_unless_present = "stories", conflicts_with = "stories")]
    pub story: Option<String>,

    /// JSON file of tracker story records to pick the story from
    #[arg(long, requires = "key")]
    pub stories: Option<PathBuf>,

    /// Key of the record to use from `--stories`
    #[arg(long)]
    pub key: Option<String>,

    /// Story identifier (random when omitted)
    #[arg(long, conflicts_with = "stories")]
    pub story_id: Option<String>,

    /// Project key
    #[arg(long, conflicts_with = "stories")]
    pub project_key: Option<String>,

    /// Also write the batch to this JSON file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format for generated test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON response body
    Json,
}
