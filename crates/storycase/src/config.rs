//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (`storycase.toml` at the workspace root)
//! 2. `~/.config/storycase/storycase.toml`
//! 3. `./storycase.toml`
//! 4. An explicit `--config` file
//! 5. `STORYCASE__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storycase_error::{ConfigError, StorycaseResult};
use storycase_generation::{GenerationOptions, Orchestrator};
use storycase_models::{ModelInvoker, ModelSettings, RetryPolicy};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storycase.toml");

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Complete application configuration.
///
/// # Example
///
/// ```toml
/// [model]
/// provider = "openai"
/// model = "gpt-4o-mini"
///
/// [retry]
/// max_attempts = 3
///
/// [generation]
/// repair_attempts = 1
///
/// [server]
/// bind = "0.0.0.0:8080"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorycaseConfig {
    /// Provider and decoding settings
    pub model: ModelSettings,
    /// Transient failure retry policy
    pub retry: RetryPolicy,
    /// Repair budget, case cap, input rules
    pub generation: GenerationOptions,
    /// HTTP server settings
    pub server: ServerSettings,
}

impl StorycaseConfig {
    /// Load configuration from every source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file cannot be read or a value has
    /// the wrong type. A missing `explicit` file is an error; missing
    /// optional files are skipped.
    #[instrument(name = "config_load", skip_all, fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> StorycaseResult<Self> {
        let env = Environment::with_prefix("STORYCASE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        Self::load_from(explicit, env)
    }

    fn load_from(explicit: Option<&Path>, env: Environment) -> StorycaseResult<Self> {
        debug!("Loading configuration: env > --config > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("storycase").join("storycase.toml");
            debug!(path = %home_config.display(), "Checking user config");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storycase").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(env)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    pub fn from_toml_str(toml: &str) -> StorycaseResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Build an orchestrator backed by the configured provider.
    ///
    /// # Errors
    ///
    /// Fails when the provider's API key is required and unset.
    pub fn build_orchestrator(&self) -> StorycaseResult<Orchestrator> {
        let driver = self.model.build_driver()?;
        let invoker = ModelInvoker::new(driver, self.retry);
        Ok(Orchestrator::new(
            invoker,
            self.model.decoding_template(),
            self.generation.clone(),
        ))
    }
}
