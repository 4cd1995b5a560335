//! HTTP surface
//!
//! Single planning endpoint plus a health probe. The request body is the
//! trip request; when a `RequestSource` is configured the body is ignored
//! and the latest stored trip document supplies the request instead.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::Context;
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::pipeline::{PipelineError, TripPipeline};
use crate::store::RequestSource;
use crate::trip::RawTripRequest;

/// Shared state behind the router
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TripPipeline>,
    /// When set, `/plan-trip` sources its request from the store instead of
    /// the body
    pub requests: Option<Arc<dyn RequestSource>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan-trip", post(plan_trip))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(listen: SocketAddr, state: AppState) -> eyre::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .context("Failed to bind server listener")?;
    info!(%listen, "serve: listening");
    axum::serve(listener, app).await.context("Server terminated with error")
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn plan_trip(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let request_id = Uuid::now_v7();
    let span = info_span!("plan_trip", %request_id);

    async move {
        debug!(body_supplied = body.is_some(), "plan_trip: called");

        let raw = match (&state.requests, body) {
            (Some(source), _) => source.latest().await.map_err(|e| {
                warn!(error = %e, "plan_trip: request source failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: e.to_string() }),
                )
            })?,
            // Deserialized here rather than by the extractor so a body with
            // wrong field types lands on the 400 path like any other
            // validation failure
            (None, Some(Json(value))) => {
                serde_json::from_value::<RawTripRequest>(value).map_err(|e| {
                    warn!(error = %e, "plan_trip: malformed request body");
                    (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorBody { error: format!("Malformed trip request: {e}") }),
                    )
                })?
            }
            (None, None) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: "Missing or malformed JSON request body".to_string(),
                    }),
                ));
            }
        };

        let response = state.pipeline.plan_trip(raw).await.map_err(|e| {
            warn!(error = %e, status = e.status_code(), "plan_trip: request failed");
            map_pipeline_error(e)
        })?;

        info!(plan_count = response.plans.len(), "plan_trip: ok");
        Ok(Json(response))
    }
    .instrument(span)
    .await
}

fn map_pipeline_error(err: PipelineError) -> (StatusCode, Json<ErrorBody>) {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody { error: err.to_string() }))
}
