//! Issue-tracker story records.

use crate::UserStory;
use serde::{Deserialize, Serialize};

/// A story as returned by an issue tracker.
///
/// # Examples
///
/// ```
/// use storycase_core::StoryRecord;
///
/// let record = StoryRecord {
///     key: "APP-42".to_string(),
///     summary: "Password reset".to_string(),
///     description: Some("As a user, I want to reset my password via email".to_string()),
///     status: "To Do".to_string(),
/// };
/// let story = record.into_user_story();
/// assert_eq!(story.id(), "APP-42");
/// assert_eq!(story.project_key().as_deref(), Some("APP"));
/// assert!(story.text().starts_with("Password reset\n\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Issue key, e.g. `APP-42`
    pub key: String,
    /// One-line summary
    pub summary: String,
    /// Long-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status
    #[serde(default)]
    pub status: String,
}

impl StoryRecord {
    /// Project key derived from the issue key prefix.
    pub fn project_key(&self) -> Option<&str> {
        self.key
            .split_once('-')
            .map(|(project, _)| project)
            .filter(|project| !project.is_empty())
    }

    /// Convert into a story; summary and description form the text.
    pub fn into_user_story(self) -> UserStory {
        let project_key = self.project_key().map(str::to_string);
        let text = match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => {
                format!("{}\n\n{}", self.summary.trim(), description)
            }
            _ => self.summary.trim().to_string(),
        };
        UserStory::new(self.key, text, project_key)
    }
}
