//! HTTP surface over the orchestrator.
//!
//! - `POST /api/test-cases` - generate a batch for one story
//! - `GET /health` - liveness probe

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storycase_core::{FailureKind, GenerateTestCasesRequest, GenerateTestCasesResponse, GenerationFailure};
use storycase_generation::Orchestrator;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The classified failure
    pub error: GenerationFailure,
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    orchestrator: Orchestrator,
    shutdown: CancellationToken,
}

impl AppState {
    /// State serving requests with `orchestrator`.
    ///
    /// Cancelling `shutdown` cancels every in-flight generation.
    pub fn new(orchestrator: Orchestrator, shutdown: CancellationToken) -> Self {
        Self {
            orchestrator,
            shutdown,
        }
    }
}

/// HTTP status for a failure kind.
pub fn status_for(kind: FailureKind) -> StatusCode {
    if kind.is_unusable_output() {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    match kind {
        FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
        FailureKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/test-cases", post(generate_test_cases))
        .with_state(state)
}

/// Serve the API on `bind` until `shutdown` is cancelled.
#[instrument(skip(state))]
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let shutdown = state.shutdown.clone();
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Generate test cases for the posted story.
async fn generate_test_cases(
    State(state): State<AppState>,
    body: Result<Json<GenerateTestCasesRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            return failure_response(GenerationFailure::new(
                FailureKind::InvalidInput,
                format!("Invalid request body: {}", rejection.body_text()),
            ));
        }
    };

    let cancel = state.shutdown.child_token();
    match state.orchestrator.generate_request(request, &cancel).await {
        Ok(batch) => (
            StatusCode::OK,
            Json(GenerateTestCasesResponse {
                test_cases: batch.into_inner(),
            }),
        )
            .into_response(),
        Err(failure) => failure_response(failure),
    }
}

fn failure_response(failure: GenerationFailure) -> Response {
    (status_for(failure.kind), Json(ErrorBody { error: failure })).into_response()
}
