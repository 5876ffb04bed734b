//! JSON file export of validated batches.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use storycase_core::{TestCase, UserStory};
use storycase_error::{ExportError, JsonError, StorycaseResult};
use storycase_interface::TestCaseSink;
use tracing::{info, instrument};

/// Document written by [`JsonFileSink`].
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    story_id: &'a str,
    project_key: Option<&'a str>,
    user_story: &'a str,
    test_cases: &'a [TestCase],
}

/// Writes each exported batch to one pretty-printed JSON file.
///
/// The file is replaced on every export; parent directories are created.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TestCaseSink for JsonFileSink {
    #[instrument(skip(self, story, test_cases), fields(path = %self.path.display(), cases = test_cases.len()))]
    async fn export(&self, story: &UserStory, test_cases: &[TestCase]) -> StorycaseResult<()> {
        let document = ExportDocument {
            story_id: story.id(),
            project_key: story.project_key().as_deref(),
            user_story: story.text(),
            test_cases,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| JsonError::new(format!("Failed to serialize export: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ExportError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            ExportError::new(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        info!("Exported test cases");
        Ok(())
    }
}
