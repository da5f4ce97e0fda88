//! Handler for health check endpoint.

use axum::extract::State;
use serde_json::json;

use crate::api::handlers::respond;
use crate::render::{RenderModel, RenderedDocument};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// The body is plain JSON rendered through the same pipeline as HAL
/// documents, without an envelope.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "entrypoint": "/widgets"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> RenderedDocument {
    let body = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "entrypoint": "/widgets",
    });

    respond(&state, Ok(RenderModel::Raw(body)))
}
