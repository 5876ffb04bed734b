//! Storycase CLI binary.
//!
//! This binary provides command-line access to Storycase:
//! - Generate test cases for a story and print or export them
//! - Serve the generation API over HTTP

use clap::Parser;
use storycase::{ObservabilityConfig, StorycaseConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_generate, run_serve};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let config = StorycaseConfig::load(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Generate(args) => {
            run_generate(&config, args).await?;
        }

        Commands::Serve { bind } => {
            run_serve(&config, bind).await?;
        }
    }

    Ok(())
}
