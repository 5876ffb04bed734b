//! `storycase serve` handler.

use storycase::server::{AppState, serve};
use storycase::{CancellationToken, StorycaseConfig};
use tracing::info;

/// Run the HTTP API until Ctrl-C.
pub async fn run_serve(
    config: &StorycaseConfig,
    bind: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = config.build_orchestrator()?;
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());

    let shutdown = CancellationToken::new();
    let on_interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            on_interrupt.cancel();
        }
    });

    serve(&bind, AppState::new(orchestrator, shutdown)).await?;
    Ok(())
}
