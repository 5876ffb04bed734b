//! Generation tuning knobs.

use crate::PromptOptions;
use crate::prompt::DEFAULT_REPAIR_TEMPLATE;
use serde::{Deserialize, Serialize};

/// Hard ceiling on configured repair cycles.
pub const MAX_REPAIR_ATTEMPTS: u32 = 5;

/// Orchestrator settings, loaded from the `[generation]` config section.
///
/// # Examples
///
/// ```
/// use storycase_generation::GenerationOptions;
///
/// let options = GenerationOptions::default();
/// assert_eq!(options.repair_attempts, 1);
/// assert!(options.max_test_cases.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Repair cycles after an unusable answer (clamped to [`MAX_REPAIR_ATTEMPTS`])
    pub repair_attempts: u32,
    /// Optional cap on cases per batch
    pub max_test_cases: Option<usize>,
    /// Reject stories without a project key
    pub require_project_key: bool,
    /// Repair prompt wording; the built-in template when unset
    pub repair_template: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            repair_attempts: 1,
            max_test_cases: None,
            require_project_key: false,
            repair_template: None,
        }
    }
}

impl GenerationOptions {
    /// Repair budget actually applied.
    pub fn repair_budget(&self) -> u32 {
        self.repair_attempts.min(MAX_REPAIR_ATTEMPTS)
    }

    /// Repair template actually applied.
    pub fn repair_template(&self) -> &str {
        self.repair_template
            .as_deref()
            .unwrap_or(DEFAULT_REPAIR_TEMPLATE)
    }

    /// Prompt constraints derived from these options.
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions::builder()
            .max_test_cases(self.max_test_cases)
            .require_project_key(self.require_project_key)
            .build()
            .unwrap_or_default()
    }
}
