//! File-backed story source.
//!
//! Reads a JSON array of tracker records, the shape an issue-tracker export
//! produces:
//!
//! ```json
//! [{"key": "APP-12", "summary": "Reset password", "description": "...", "status": "To Do"}]
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storycase_core::StoryRecord;
use storycase_error::{StoryError, StoryErrorKind, StorycaseResult};
use storycase_interface::StorySource;
use tracing::{debug, instrument};

/// Story records loaded from a JSON file on each call.
#[derive(Debug, Clone)]
pub struct JsonFileStorySource {
    path: PathBuf,
}

impl JsonFileStorySource {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorySource for JsonFileStorySource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_story(&self, key: &str) -> StorycaseResult<StoryRecord> {
        let record = self
            .list_stories()
            .await?
            .into_iter()
            .find(|record| record.key.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| StoryError::new(StoryErrorKind::NotFound(key.to_string())))?;
        Ok(record)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_stories(&self) -> StorycaseResult<Vec<StoryRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoryError::new(StoryErrorKind::Read(format!("{}: {}", self.path.display(), e)))
        })?;
        let records: Vec<StoryRecord> = serde_json::from_str(&contents)
            .map_err(|e| StoryError::new(StoryErrorKind::Malformed(e.to_string())))?;

        debug!(count = records.len(), "Loaded story records");
        Ok(records)
    }
}
