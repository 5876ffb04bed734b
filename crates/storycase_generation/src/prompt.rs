//! Deterministic prompt construction.
//!
//! [`build`] turns a story into the initial generation prompt and
//! [`build_repair`] wraps a previous attempt into a corrective prompt. Both
//! are pure: identical arguments always yield byte-identical text.

use derive_builder::Builder;
use derive_getters::Getters;
use storycase_core::UserStory;
use storycase_error::{InputError, InputErrorKind};

/// Default wording of the repair prompt.
///
/// Placeholders: `{original_prompt}`, `{raw_output}`, `{failure}`.
pub const DEFAULT_REPAIR_TEMPLATE: &str = "\
{original_prompt}

Your previous response could not be used.

Previous response:
<<<
{raw_output}
>>>

Problem: {failure}

Return only the corrected JSON array of test cases. Every test case must have \
a non-empty title, at least one step, and exactly one expected result per step. \
Do not include any text before or after the JSON.";

/// Model-ready prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Prompt(String);

impl Prompt {
    /// Prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the prompt text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Constraints applied while building prompts.
///
/// # Examples
///
/// ```
/// use storycase_generation::PromptOptions;
///
/// let options = PromptOptions::builder()
///     .max_test_cases(Some(5))
///     .require_project_key(true)
///     .build()
///     .unwrap();
/// assert_eq!(*options.max_test_cases(), Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Builder, Getters)]
#[builder(setter(into), default)]
pub struct PromptOptions {
    /// Upper bound on test cases the model is asked for
    max_test_cases: Option<usize>,
    /// Reject stories without a project key
    require_project_key: bool,
}

impl PromptOptions {
    /// Start building options.
    pub fn builder() -> PromptOptionsBuilder {
        PromptOptionsBuilder::default()
    }
}

/// Build the generation prompt for a story.
///
/// The story text is embedded verbatim.
///
/// # Errors
///
/// - [`InputErrorKind::EmptyStoryText`] when the text is empty or whitespace
/// - [`InputErrorKind::MissingProjectKey`] when `require_project_key` is set
///   and the key is absent or blank
pub fn build(story: &UserStory, options: &PromptOptions) -> Result<Prompt, InputError> {
    if story.text().trim().is_empty() {
        return Err(InputError::new(InputErrorKind::EmptyStoryText));
    }

    let project_key = story
        .project_key()
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());
    if options.require_project_key && project_key.is_none() {
        return Err(InputError::new(InputErrorKind::MissingProjectKey));
    }

    let mut text = String::new();
    text.push_str("You are a senior QA engineer. Write test cases for the user story below.\n\n");
    text.push_str("User story:\n<<<\n");
    text.push_str(story.text());
    text.push_str("\n>>>\n\n");
    if let Some(key) = project_key {
        text.push_str(&format!("Project: {key}\n\n"));
    }
    text.push_str(
        "Respond with JSON only: an array of test case objects. Each object has these fields:\n\
         - \"id\": string, unique within the response (for example \"TC-1\")\n\
         - \"title\": string, a short non-empty summary of what is verified\n\
         - \"steps\": array of strings, at least one step, in execution order\n\
         - \"expected_results\": array of strings, exactly one per step, in the same order\n\
         - \"priority\": one of \"Low\", \"Medium\", \"High\"\n\n\
         The number of expected_results must equal the number of steps in every test case.\n",
    );
    if let Some(max) = options.max_test_cases {
        text.push_str(&format!("Return at most {max} test cases.\n"));
    }
    text.push_str("Do not include any text before or after the JSON.");

    Ok(Prompt(text))
}

/// Build a repair prompt with the default wording.
pub fn build_repair(original: &Prompt, failure: &str, raw_output: &str) -> Prompt {
    render_repair(DEFAULT_REPAIR_TEMPLATE, original, failure, raw_output)
}

/// Build a repair prompt from a template.
///
/// Placeholders are substituted in a single pass, so placeholder-like text
/// inside the raw output or failure message is left alone. Unknown
/// placeholders are kept verbatim.
pub fn render_repair(template: &str, original: &Prompt, failure: &str, raw_output: &str) -> Prompt {
    let mut out = String::with_capacity(template.len() + original.0.len() + raw_output.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            rest = "";
            break;
        };
        // Innermost brace pair, so `{{failure}` keeps one literal brace
        let start = tail[..close].rfind('{').unwrap_or(0);
        out.push_str(&tail[..start]);
        match &tail[start + 1..close] {
            "original_prompt" => out.push_str(original.as_str()),
            "raw_output" => out.push_str(raw_output),
            "failure" => out.push_str(failure),
            _ => out.push_str(&tail[start..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);

    Prompt(out)
}
