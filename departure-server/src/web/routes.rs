//! HTTP route handlers.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::dispatch::Input;

use super::api::{ApiError, Reply};
use super::state::AppState;

const API_PREFIX: &str = "/api";

/// Error body returned for failed API requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create the application router.
///
/// `static_dir` is the root for every path outside `/api/`.
pub fn create_router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(api))
        .route("/api/", get(api))
        .route("/api/*path", get(api))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve an API path.
///
/// Segments are taken from the raw request path, so an encoded `%2F` stays
/// inside its segment.
async fn api(
    State(state): State<AppState>,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Reply>, ApiError> {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or_default();
    dispatch(&state, split_path(path), first_values(pairs)).await
}

/// Split a request path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// One value per query key; the first occurrence wins.
pub fn first_values(pairs: Vec<(String, String)>) -> Input {
    let mut input = Input::new();
    for (key, value) in pairs {
        input.entry(key).or_insert(value);
    }
    input
}

/// Run the (blocking) resolution off the async executor.
async fn dispatch(
    state: &AppState,
    segments: Vec<String>,
    input: Input,
) -> Result<Json<Reply>, ApiError> {
    let api = Arc::clone(&state.api);
    let reply = tokio::task::spawn_blocking(move || api.resolve(&segments, &input))
        .await
        .map_err(|e| ApiError::Internal(format!("dispatch task failed: {e}")))??;

    Ok(Json(reply))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Dispatch(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();

        warn!(%status, error = %message, "api request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
