//! API route configuration.

use crate::api::handlers::{
    health_handler, manufacturer_handler, widget_handler, widget_list_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All public routes.
///
/// # Endpoints
///
/// - `GET /health`              - Plain JSON health status
/// - `GET /widgets`             - Paginated widget collection
/// - `GET /widgets/{id}`        - Widget with embedded manufacturer
/// - `GET /manufacturers/{id}`  - Manufacturer
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/widgets", get(widget_list_handler))
        .route("/widgets/{id}", get(widget_handler))
        .route("/manufacturers/{id}", get(manufacturer_handler))
}
