//! Extraction of candidate test cases from free-form model output.
//!
//! Models wrap JSON in markdown fences, prefix it with explanations, or
//! answer with a bare object instead of a list. The parser collects every
//! well-formed JSON block it can find (the whole text, fenced blocks and
//! balanced `{...}` / `[...]` spans), keeps the longest one, and reads test
//! cases out of it leniently.

use derive_getters::Getters;
use serde_json::{Map, Value};
use std::str::FromStr;
use storycase_core::Priority;
use storycase_error::{ParseError, ParseErrorKind};
use tracing::{debug, instrument};

/// A test case as read from model output, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CandidateCase {
    /// Model-supplied id, if any
    id: Option<String>,
    /// Title as given
    title: String,
    /// Steps in order
    steps: Vec<String>,
    /// Expected results in order; empty when the model left them out
    expected_results: Vec<String>,
    /// Priority, `Medium` when absent or unrecognized
    priority: Priority,
}

impl CandidateCase {
    /// Create a candidate case.
    pub fn new(
        id: Option<String>,
        title: impl Into<String>,
        steps: Vec<String>,
        expected_results: Vec<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            steps,
            expected_results,
            priority,
        }
    }

    /// Split into owned parts: `(id, title, steps, expected_results, priority)`.
    pub fn into_parts(self) -> (Option<String>, String, Vec<String>, Vec<String>, Priority) {
        (
            self.id,
            self.title,
            self.steps,
            self.expected_results,
            self.priority,
        )
    }
}

/// Unvalidated cases in model order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct ParsedCandidate {
    /// Candidate cases
    cases: Vec<CandidateCase>,
}

impl ParsedCandidate {
    /// Wrap a list of candidate cases.
    pub fn new(cases: Vec<CandidateCase>) -> Self {
        Self { cases }
    }

    /// Consume into the case list.
    pub fn into_cases(self) -> Vec<CandidateCase> {
        self.cases
    }
}

/// Parse raw model output into candidate test cases.
///
/// # Errors
///
/// - [`ParseErrorKind::Unparseable`] when no well-formed JSON is present
/// - [`ParseErrorKind::UnexpectedShape`] when the JSON is not a case list,
///   a `test_cases` wrapper, or a single case
/// - [`ParseErrorKind::MissingField`] / [`ParseErrorKind::InvalidField`]
///   naming the case index and field
///
/// # Examples
///
/// ```
/// use storycase_generation::parse;
///
/// let raw = "Here you go:\n```json\n[{\"title\": \"Login\", \"steps\": [\"Open\"], \"expected_results\": [\"Shown\"]}]\n```";
/// let candidate = parse(raw).unwrap();
/// assert_eq!(candidate.cases().len(), 1);
/// ```
#[instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn parse(raw: &str) -> Result<ParsedCandidate, ParseError> {
    let value = extract_json(raw).ok_or_else(|| ParseError::new(ParseErrorKind::Unparseable))?;
    let items = case_values(value)?;

    let cases = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| read_case(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(cases = cases.len(), "Parsed candidate test cases");
    Ok(ParsedCandidate { cases })
}

/// Longest well-formed JSON value embedded in `response`.
pub fn extract_json(response: &str) -> Option<Value> {
    let mut blocks: Vec<&str> = vec![response.trim()];
    blocks.extend(code_blocks(response));
    blocks.extend(balanced_blocks(response));

    blocks
        .into_iter()
        .filter(|block| !block.is_empty())
        .filter_map(|block| {
            serde_json::from_str::<Value>(block)
                .ok()
                .map(|value| (block.len(), value))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, value)| value)
}

/// Contents of every closed markdown code fence.
fn code_blocks(response: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = response;

    while let Some(start) = rest.find("```") {
        let after_fence = &rest[start + 3..];
        // Skip the language tag line
        let body_start = after_fence.find('\n').map(|n| n + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        let Some(end) = body.find("```") else {
            break;
        };
        blocks.push(body[..end].trim());
        rest = &body[end + 3..];
    }

    blocks
}

/// Every balanced `{...}` or `[...]` span that is valid JSON.
///
/// Scanning resumes after a valid span, so nested spans of an accepted
/// block are not revisited.
fn balanced_blocks(response: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut offset = 0;

    while offset < response.len() {
        let Some(rel) = response[offset..].find(['{', '[']) else {
            break;
        };
        let start = offset + rel;
        match balanced_end(&response[start..]) {
            Some(len) if serde_json::from_str::<Value>(&response[start..start + len]).is_ok() => {
                blocks.push(&response[start..start + len]);
                offset = start + len;
            }
            _ => offset = start + 1,
        }
    }

    blocks
}

/// Byte length of the balanced span opening at the start of `text`.
fn balanced_end(text: &str) -> Option<usize> {
    let open = text.chars().next()?;
    let close = match open {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// The list of case values inside an accepted top-level shape.
fn case_values(value: Value) -> Result<Vec<Value>, ParseError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            let wrapped = map.remove("test_cases").or_else(|| map.remove("testCases"));
            match wrapped {
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(ParseError::new(ParseErrorKind::UnexpectedShape(format!(
                    "test_cases must be an array, found {}",
                    type_name(&other)
                )))),
                None if map.contains_key("title") || map.contains_key("steps") => {
                    Ok(vec![Value::Object(map)])
                }
                None => Err(ParseError::new(ParseErrorKind::UnexpectedShape(
                    "object has neither a test_cases array nor test case fields".to_string(),
                ))),
            }
        }
        other => Err(ParseError::new(ParseErrorKind::UnexpectedShape(format!(
            "expected an array or object, found {}",
            type_name(&other)
        )))),
    }
}

fn read_case(index: usize, value: Value) -> Result<CandidateCase, ParseError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ParseError::new(ParseErrorKind::InvalidField {
                index,
                field: "test case",
                reason: format!("expected an object, found {}", type_name(&other)),
            }));
        }
    };

    let title = match take(&mut map, &["title"]) {
        None => return Err(missing(index, "title")),
        Some(Value::String(title)) => title,
        Some(other) => return Err(invalid(index, "title", &other)),
    };
    let steps = match take(&mut map, &["steps"]) {
        None => return Err(missing(index, "steps")),
        Some(value) => string_list(index, "steps", value)?,
    };
    let expected_results = match take(&mut map, &["expected_results", "expectedResults"]) {
        None => Vec::new(),
        Some(value) => string_list(index, "expected_results", value)?,
    };
    let id = match take(&mut map, &["id"]) {
        None => None,
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => return Err(invalid(index, "id", &other)),
    };
    let priority = match take(&mut map, &["priority"]) {
        Some(Value::String(p)) => Priority::from_str(p.trim()).unwrap_or_default(),
        _ => Priority::default(),
    };

    Ok(CandidateCase {
        id,
        title,
        steps,
        expected_results,
        priority,
    })
}

/// Remove the first present, non-null key.
fn take(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|key| map.remove(*key))
        .find(|value| !value.is_null())
}

/// An array of strings, or a single string taken as a one-item list.
fn string_list(index: usize, field: &'static str, value: Value) -> Result<Vec<String>, ParseError> {
    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(invalid(index, field, &other)),
            })
            .collect(),
        other => Err(invalid(index, field, &other)),
    }
}

fn missing(index: usize, field: &'static str) -> ParseError {
    ParseError::new(ParseErrorKind::MissingField { index, field })
}

fn invalid(index: usize, field: &'static str, found: &Value) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidField {
        index,
        field,
        reason: format!("unexpected {}", type_name(found)),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
