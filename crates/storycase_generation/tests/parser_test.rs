//! Response parser against realistic model outputs.

use storycase_core::Priority;
use storycase_error::ParseErrorKind;
use storycase_generation::{parse, validate};

#[test]
fn test_parse_plain_array() -> anyhow::Result<()> {
    let raw = r#"[{"id": "TC-1", "title": "Login", "steps": ["Open", "Submit"], "expected_results": ["Form", "Home"], "priority": "low"}]"#;
    let candidate = parse(raw)?;

    assert_eq!(candidate.cases().len(), 1);
    let case = &candidate.cases()[0];
    assert_eq!(case.id().as_deref(), Some("TC-1"));
    assert_eq!(case.steps().len(), 2);
    assert_eq!(*case.priority(), Priority::Low);
    Ok(())
}

#[test]
fn test_parse_wrapped_objects() -> anyhow::Result<()> {
    for raw in [
        r#"{"test_cases": [{"title": "A", "steps": ["s"], "expected_results": ["r"]}]}"#,
        r#"{"testCases": [{"title": "A", "steps": ["s"], "expectedResults": ["r"]}]}"#,
    ] {
        let candidate = parse(raw)?;
        assert_eq!(candidate.cases().len(), 1);
        assert_eq!(candidate.cases()[0].expected_results(), &vec!["r".to_string()]);
    }
    Ok(())
}

#[test]
fn test_parse_single_case_object() -> anyhow::Result<()> {
    let raw = r#"Here is one test case: {"title": "A", "steps": ["s"], "expected_results": ["r"]}"#;
    assert_eq!(parse(raw)?.cases().len(), 1);
    Ok(())
}

#[test]
fn test_parse_fenced_with_commentary() -> anyhow::Result<()> {
    let raw = "I generated the following cases.\n\n```json\n[\n  {\"title\": \"Reset link expires\", \"steps\": [\"Request reset\", \"Wait 25 hours\", \"Open link\"], \"expected_results\": [\"Email sent\", \"-\", \"Link rejected\"]}\n]\n```\n\nThe third step uses {braces} in prose.";
    let candidate = parse(raw)?;
    assert_eq!(candidate.cases()[0].title(), "Reset link expires");
    assert_eq!(candidate.cases()[0].steps().len(), 3);
    Ok(())
}

#[test]
fn test_priority_defaults_to_medium() -> anyhow::Result<()> {
    let raw = r#"[
        {"title": "A", "steps": ["s"], "expected_results": ["r"]},
        {"title": "B", "steps": ["s"], "expected_results": ["r"], "priority": "urgent-ish"},
        {"title": "C", "steps": ["s"], "expected_results": ["r"], "priority": "CRITICAL"}
    ]"#;
    let candidate = parse(raw)?;
    let priorities: Vec<_> = candidate.cases().iter().map(|c| *c.priority()).collect();
    assert_eq!(priorities, vec![Priority::Medium, Priority::Medium, Priority::High]);
    Ok(())
}

#[test]
fn test_unknown_fields_ignored() -> anyhow::Result<()> {
    let raw = r#"[{"title": "A", "steps": ["s"], "expected_results": ["r"], "preconditions": ["logged in"], "tags": 3}]"#;
    assert_eq!(parse(raw)?.cases().len(), 1);
    Ok(())
}

#[test]
fn test_missing_required_fields_name_index() {
    let raw = r#"[{"title": "A", "steps": ["s"]}, {"title": "B"}]"#;
    let err = parse(raw).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingField {
            index: 1,
            field: "steps"
        }
    );
}

#[test]
fn test_missing_expected_results_fails_validation() -> anyhow::Result<()> {
    let candidate = parse(r#"[{"title": "A", "steps": ["s"]}]"#)?;
    assert!(candidate.cases()[0].expected_results().is_empty());
    assert!(validate(candidate).is_err());
    Ok(())
}

#[test]
fn test_unparseable_text() {
    for raw in ["", "No test cases today.", "[{\"title\": \"truncated\", \"steps\": [\"a\""] {
        let err = parse(raw).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Unparseable, "input: {raw:?}");
    }
}

#[test]
fn test_unexpected_shapes() {
    for raw in [r#""just a string""#, r#"{"summary": "nothing"}"#, r#"{"test_cases": "none"}"#] {
        let err = parse(raw).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::UnexpectedShape(_)),
            "input: {raw}, got {:?}",
            err.kind
        );
    }
}

#[test]
fn test_wrong_field_type() {
    let err = parse(r#"[{"title": ["not", "a", "string"], "steps": ["s"]}]"#).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::InvalidField {
            index: 0,
            field: "title",
            ..
        }
    ));
}
