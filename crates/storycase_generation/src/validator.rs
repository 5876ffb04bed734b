//! Schema validation of parsed candidates.

use crate::{CandidateCase, ParsedCandidate};
use serde::Serialize;
use std::collections::HashSet;
use storycase_core::TestCase;
use storycase_error::{ValidationError, ValidationErrorKind};
use tracing::{debug, instrument};

/// A non-empty batch of test cases that passed validation.
///
/// Only [`validate`] and [`validate_with_limit`] construct batches, so every
/// batch holds at least one case, every case has a title and aligned
/// steps/results, and ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestCaseBatch(Vec<TestCase>);

impl TestCaseBatch {
    /// Cases in model order.
    pub fn cases(&self) -> &[TestCase] {
        &self.0
    }

    /// Number of cases; never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated batch.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the cases.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.0.iter()
    }

    /// Consume into the case list.
    pub fn into_inner(self) -> Vec<TestCase> {
        self.0
    }
}

impl IntoIterator for TestCaseBatch {
    type Item = TestCase;
    type IntoIter = std::vec::IntoIter<TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TestCaseBatch {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate a candidate without a case cap.
pub fn validate(candidate: ParsedCandidate) -> Result<TestCaseBatch, ValidationError> {
    validate_with_limit(candidate, None)
}

/// Validate a candidate and turn it into a batch.
///
/// Whitespace is trimmed from ids, titles, steps and results. When the model
/// gave no ids at all, cases are numbered `TC-1..TC-n`; when only some are
/// missing, each missing id becomes `TC-<position>` before the uniqueness
/// check.
///
/// # Errors
///
/// The first violated rule, checked in order: empty batch, case cap, then
/// per case title, steps, blank steps, step/result alignment and blank
/// results, then id uniqueness.
#[instrument(skip(candidate), fields(cases = candidate.cases().len()))]
pub fn validate_with_limit(
    candidate: ParsedCandidate,
    max_test_cases: Option<usize>,
) -> Result<TestCaseBatch, ValidationError> {
    let cases = candidate.into_cases();

    if cases.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::EmptyBatch));
    }
    if let Some(max) = max_test_cases.filter(|max| cases.len() > *max) {
        return Err(ValidationError::new(ValidationErrorKind::TooManyCases {
            count: cases.len(),
            max,
        }));
    }

    let all_ids_missing = cases.iter().all(|case| trimmed_id(case).is_none());
    let mut seen = HashSet::with_capacity(cases.len());
    let mut batch = Vec::with_capacity(cases.len());

    for (index, case) in cases.into_iter().enumerate() {
        let (id, title, steps, expected_results, priority) = case.into_parts();

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyTitle { index }));
        }

        let steps = trim_all(steps);
        if steps.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NoSteps { index }));
        }

        if let Some(step) = first_blank(&steps) {
            return Err(ValidationError::new(ValidationErrorKind::BlankStep { index, step }));
        }

        let expected_results = trim_all(expected_results);
        if steps.len() != expected_results.len() {
            return Err(ValidationError::new(ValidationErrorKind::StepCountMismatch {
                index,
                steps: steps.len(),
                expected_results: expected_results.len(),
            }));
        }
        if let Some(step) = first_blank(&expected_results) {
            return Err(ValidationError::new(ValidationErrorKind::BlankExpectedResult {
                index,
                step,
            }));
        }

        let id = match id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()) {
            Some(id) if !all_ids_missing => id,
            _ => format!("TC-{}", index + 1),
        };
        if !seen.insert(id.clone()) {
            return Err(ValidationError::new(ValidationErrorKind::DuplicateId(id)));
        }

        batch.push(TestCase::new(id, title, steps, expected_results, priority));
    }

    debug!(cases = batch.len(), "Validated test case batch");
    Ok(TestCaseBatch(batch))
}

fn trimmed_id(case: &CandidateCase) -> Option<&str> {
    case.id().as_deref().map(str::trim).filter(|id| !id.is_empty())
}

fn trim_all(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|item| item.trim().to_string()).collect()
}

fn first_blank(items: &[String]) -> Option<usize> {
    items.iter().position(|item| item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storycase_core::Priority;

    fn case(id: Option<&str>, title: &str, steps: &[&str], results: &[&str]) -> CandidateCase {
        CandidateCase::new(
            id.map(String::from),
            title,
            steps.iter().map(|s| s.to_string()).collect(),
            results.iter().map(|s| s.to_string()).collect(),
            Priority::Medium,
        )
    }

    fn kind(result: Result<TestCaseBatch, ValidationError>) -> ValidationErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_valid_batch_is_trimmed() {
        let candidate = ParsedCandidate::new(vec![case(
            Some(" TC-7 "),
            "  Reset email is sent ",
            &[" Open page", "Submit "],
            &["Shown ", " Sent"],
        )]);

        let batch = validate(candidate).unwrap();
        let case = &batch.cases()[0];
        assert_eq!(case.id(), "TC-7");
        assert_eq!(case.title(), "Reset email is sent");
        assert_eq!(case.steps(), &vec!["Open page".to_string(), "Submit".to_string()]);
        assert_eq!(case.expected_results(), &vec!["Shown".to_string(), "Sent".to_string()]);
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(kind(validate(ParsedCandidate::default())), ValidationErrorKind::EmptyBatch);
    }

    #[test]
    fn test_each_rule_names_the_case() {
        let ok = case(None, "ok", &["a"], &["b"]);

        let blank_title = ParsedCandidate::new(vec![ok.clone(), case(None, "  ", &["a"], &["b"])]);
        assert_eq!(kind(validate(blank_title)), ValidationErrorKind::EmptyTitle { index: 1 });

        let no_steps = ParsedCandidate::new(vec![case(None, "t", &[], &[])]);
        assert_eq!(kind(validate(no_steps)), ValidationErrorKind::NoSteps { index: 0 });

        let mismatch = ParsedCandidate::new(vec![ok, case(None, "t", &["a", "b", "c"], &["x", "y"])]);
        assert_eq!(
            kind(validate(mismatch)),
            ValidationErrorKind::StepCountMismatch {
                index: 1,
                steps: 3,
                expected_results: 2
            }
        );
    }

    #[test]
    fn test_blank_step_rejected() {
        let candidate = ParsedCandidate::new(vec![case(None, "T", &["  "], &[""])]);
        assert_eq!(
            kind(validate(candidate)),
            ValidationErrorKind::BlankStep { index: 0, step: 0 }
        );

        let candidate = ParsedCandidate::new(vec![case(None, "T", &["Open page", "\t"], &["a", "b"])]);
        assert_eq!(
            kind(validate(candidate)),
            ValidationErrorKind::BlankStep { index: 0, step: 1 }
        );
    }

    #[test]
    fn test_blank_expected_result_rejected() {
        let candidate = ParsedCandidate::new(vec![
            case(None, "a", &["s"], &["r"]),
            case(None, "b", &["Open page", "Submit"], &["Form shown", " "]),
        ]);
        assert_eq!(
            kind(validate(candidate)),
            ValidationErrorKind::BlankExpectedResult { index: 1, step: 1 }
        );
    }

    #[test]
    fn test_missing_ids_are_numbered() {
        let candidate = ParsedCandidate::new(vec![
            case(None, "a", &["s"], &["r"]),
            case(Some("  "), "b", &["s"], &["r"]),
            case(None, "c", &["s"], &["r"]),
        ]);

        let batch = validate(candidate).unwrap();
        let ids: Vec<_> = batch.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["TC-1", "TC-2", "TC-3"]);
    }

    #[test]
    fn test_partial_ids_fill_by_position() {
        let candidate = ParsedCandidate::new(vec![
            case(Some("LOGIN-1"), "a", &["s"], &["r"]),
            case(None, "b", &["s"], &["r"]),
        ]);

        let batch = validate(candidate).unwrap();
        let ids: Vec<_> = batch.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["LOGIN-1", "TC-2"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let candidate = ParsedCandidate::new(vec![
            case(Some("TC-1"), "a", &["s"], &["r"]),
            case(Some("TC-1 "), "b", &["s"], &["r"]),
        ]);
        assert_eq!(kind(validate(candidate)), ValidationErrorKind::DuplicateId("TC-1".to_string()));

        // A filled-in id can collide with one the model chose
        let candidate = ParsedCandidate::new(vec![
            case(Some("TC-2"), "a", &["s"], &["r"]),
            case(None, "b", &["s"], &["r"]),
        ]);
        assert_eq!(kind(validate(candidate)), ValidationErrorKind::DuplicateId("TC-2".to_string()));
    }

    #[test]
    fn test_case_cap() {
        let candidate = ParsedCandidate::new(vec![
            case(None, "a", &["s"], &["r"]),
            case(None, "b", &["s"], &["r"]),
            case(None, "c", &["s"], &["r"]),
        ]);
        assert_eq!(
            kind(validate_with_limit(candidate.clone(), Some(2))),
            ValidationErrorKind::TooManyCases { count: 3, max: 2 }
        );
        assert_eq!(validate_with_limit(candidate, Some(3)).unwrap().len(), 3);
    }
}
