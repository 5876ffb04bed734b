//! Live calls against a real OpenAI-compatible endpoint.
//!
//! Run with `cargo test -p storycase_models --features api` and
//! `OPENAI_API_KEY` set.

#![cfg(feature = "api")]

use storycase_models::{ModelInvoker, ModelSettings, RetryPolicy};

#[tokio::test]
async fn test_openai_returns_text() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let settings = ModelSettings::default();
    let invoker = ModelInvoker::new(settings.build_driver()?, RetryPolicy::default());

    let request = settings
        .decoding_template()
        .with_prompt("Reply with the JSON array [1, 2, 3] and nothing else.");
    let text = invoker.invoke(&request).await?;

    assert!(text.contains('['));
    Ok(())
}
