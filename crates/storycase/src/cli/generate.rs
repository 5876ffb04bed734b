//! `storycase generate` handler.

use super::{GenerateArgs, OutputFormat};
use storycase::{
    CancellationToken, GenerateTestCasesRequest, GenerateTestCasesResponse, JsonFileSink,
    JsonFileStorySource, StorySource, StorycaseConfig, TestCaseBatch, TestCaseSink, UserStory,
};
use tracing::{info, warn};

/// Generate a batch for one story and print it.
pub async fn run_generate(
    config: &StorycaseConfig,
    args: GenerateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let story = resolve_story(&args).await?;
    let orchestrator = config.build_orchestrator()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling generation");
            on_interrupt.cancel();
        }
    });

    let batch = match orchestrator.generate(&story, &cancel).await {
        Ok(batch) => batch,
        Err(failure) => {
            if let Some(raw) = &failure.raw_model_output {
                eprintln!("Last model output:\n{raw}\n");
            }
            return Err(failure.into());
        }
    };

    match args.format {
        OutputFormat::Human => print!("{}", render_human(&batch)),
        OutputFormat::Json => {
            let response = GenerateTestCasesResponse {
                test_cases: batch.cases().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    if let Some(path) = args.output {
        let sink = JsonFileSink::new(path);
        sink.export(&story, batch.cases()).await?;
        info!(path = %sink.path().display(), "Wrote test cases");
    }

    Ok(())
}

async fn resolve_story(args: &GenerateArgs) -> Result<UserStory, Box<dyn std::error::Error>> {
    if let (Some(path), Some(key)) = (&args.stories, &args.key) {
        let record = JsonFileStorySource::new(path).fetch_story(key).await?;
        return Ok(record.into_user_story());
    }

    let request = GenerateTestCasesRequest {
        user_story: args.story.clone().unwrap_or_default(),
        story_id: args.story_id.clone(),
        project_key: args.project_key.clone(),
    };
    Ok(request.into_user_story())
}

/// Plain-text listing of a batch.
fn render_human(batch: &TestCaseBatch) -> String {
    let mut out = String::new();
    for case in batch {
        out.push_str(&format!("{} [{}] {}\n", case.id(), case.priority(), case.title()));
        for (i, (step, expected)) in case.step_pairs().enumerate() {
            out.push_str(&format!("  {}. {}\n     => {}\n", i + 1, step, expected));
        }
        out.push('\n');
    }
    out
}
