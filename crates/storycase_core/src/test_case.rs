//! Test case and priority types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Test case priority.
///
/// Parsing is case-insensitive and accepts a few common synonyms.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use storycase_core::Priority;
///
/// assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
/// assert_eq!(Priority::from_str("critical").unwrap(), Priority::High);
/// assert_eq!(Priority::default(), Priority::Medium);
/// assert_eq!(Priority::Low.to_string(), "Low");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    /// Low priority
    #[strum(to_string = "Low", serialize = "minor", serialize = "p3")]
    Low,
    /// Medium priority (default)
    #[default]
    #[strum(to_string = "Medium", serialize = "normal", serialize = "p2")]
    Medium,
    /// High priority
    #[strum(to_string = "High", serialize = "critical", serialize = "p1")]
    High,
}

/// A single validated QA test case.
///
/// `steps` and `expected_results` are index-aligned: `expected_results[i]`
/// is the outcome of performing `steps[i]`.
///
/// # Examples
///
/// ```
/// use storycase_core::{Priority, TestCase};
///
/// let case = TestCase::new(
///     "TC-1",
///     "Verify password reset email is sent",
///     vec!["Open the reset page".to_string(), "Submit a registered email".to_string()],
///     vec!["Form is shown".to_string(), "Email is sent".to_string()],
///     Priority::High,
/// );
/// assert_eq!(case.steps().len(), case.expected_results().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct TestCase {
    /// Identifier, unique within its batch
    id: String,
    /// Short description
    title: String,
    /// Ordered steps
    steps: Vec<String>,
    /// Ordered expected results, one per step
    expected_results: Vec<String>,
    /// Priority
    priority: Priority,
}

impl TestCase {
    /// Create a test case.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        steps: Vec<String>,
        expected_results: Vec<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            steps,
            expected_results,
            priority,
        }
    }

    /// Iterate over `(step, expected_result)` pairs.
    pub fn step_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.steps
            .iter()
            .map(String::as_str)
            .zip(self.expected_results.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_priority_display_round_trips_through_from_str() {
        for priority in Priority::iter() {
            assert_eq!(Priority::from_str(&priority.to_string()).unwrap(), priority);
        }
    }

    #[test]
    fn test_priority_rejects_unknown() {
        assert!(Priority::from_str("urgent-ish").is_err());
    }

    #[test]
    fn test_test_case_wire_shape() {
        let case = TestCase::new(
            "TC-1",
            "Login",
            vec!["Open app".to_string()],
            vec!["App opens".to_string()],
            Priority::Medium,
        );
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["expected_results"][0], "App opens");
        assert_eq!(json["priority"], "Medium");
    }
}
