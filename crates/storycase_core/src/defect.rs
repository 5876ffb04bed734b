//! Defect records logged against generated test cases.
//!
//! Storage lives outside this workspace; these types only pin down the link
//! to a stable [`TestCase`](crate::TestCase) id.

use crate::TestCase;
use serde::{Deserialize, Serialize};

/// Defect severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum DefectSeverity {
    /// Cosmetic or minor
    Minor,
    /// Degrades a feature
    Major,
    /// Blocks a feature
    Critical,
}

/// Defect workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum DefectStatus {
    /// Newly logged
    Open,
    /// Being worked on
    InProgress,
    /// Fixed and verified
    Closed,
}

/// A defect linked to a test case id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    /// Defect identifier
    pub id: String,
    /// Id of the test case that found it
    pub linked_test_case_id: String,
    /// Severity
    pub severity: DefectSeverity,
    /// Status
    pub status: DefectStatus,
}

impl DefectRecord {
    /// Log a new open defect against `case`.
    pub fn for_case(id: impl Into<String>, case: &TestCase, severity: DefectSeverity) -> Self {
        Self {
            id: id.into(),
            linked_test_case_id: case.id().clone(),
            severity,
            status: DefectStatus::Open,
        }
    }

    /// Whether this defect points at `case`.
    pub fn links_to(&self, case: &TestCase) -> bool {
        &self.linked_test_case_id == case.id()
    }
}
