//! Story input and the request/response shapes wrapped around it.

use crate::TestCase;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A free-text requirement submitted for test generation.
///
/// Immutable once constructed; the pipeline only reads it.
///
/// # Examples
///
/// ```
/// use storycase_core::UserStory;
///
/// let story = UserStory::new("JIRA-9", "As a user, I want to reset my password", Some("APP".to_string()));
/// assert_eq!(story.id(), "JIRA-9");
/// assert_eq!(story.project_key().as_deref(), Some("APP"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct UserStory {
    /// Caller-supplied story identifier
    id: String,
    /// Story text, embedded verbatim into the prompt
    text: String,
    /// Optional project key
    project_key: Option<String>,
}

impl UserStory {
    /// Create a story.
    pub fn new(id: impl Into<String>, text: impl Into<String>, project_key: Option<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            project_key,
        }
    }
}

/// Inbound generation request as accepted over HTTP.
///
/// # Examples
///
/// ```
/// use storycase_core::GenerateTestCasesRequest;
///
/// let json = r#"{"user_story": "As a user, I want to log in", "story_id": "APP-1"}"#;
/// let request: GenerateTestCasesRequest = serde_json::from_str(json).unwrap();
/// let story = request.into_user_story();
/// assert_eq!(story.id(), "APP-1");
/// assert!(story.project_key().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTestCasesRequest {
    /// Story text (required, must be non-empty)
    pub user_story: String,
    /// Passthrough story identifier
    #[serde(default)]
    pub story_id: Option<String>,
    /// Passthrough project key
    #[serde(default)]
    pub project_key: Option<String>,
}

impl GenerateTestCasesRequest {
    /// Convert into a [`UserStory`], assigning a random id when none was given.
    ///
    /// Blank `story_id` and `project_key` values are treated as absent.
    pub fn into_user_story(self) -> UserStory {
        let id = self
            .story_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("STORY-{}", uuid::Uuid::new_v4()));
        let project_key = self.project_key.filter(|key| !key.trim().is_empty());
        UserStory::new(id, self.user_story, project_key)
    }
}

/// Successful generation response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTestCasesResponse {
    /// The validated batch, in model order
    pub test_cases: Vec<TestCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_story_id_gets_generated() {
        let request = GenerateTestCasesRequest {
            user_story: "As a user...".to_string(),
            story_id: None,
            project_key: Some("  ".to_string()),
        };
        let story = request.into_user_story();
        assert!(story.id().starts_with("STORY-"));
        assert!(story.project_key().is_none());
    }
}
