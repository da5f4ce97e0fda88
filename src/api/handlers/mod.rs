//! HTTP request handlers.
//!
//! Handlers build a [`RenderModel`] and hand it to the shared renderer.
//! Every failure, including unexpected ones, leaves as a problem document.

pub mod health;
pub mod widgets;

pub use health::health_handler;
pub use widgets::{manufacturer_handler, widget_handler, widget_list_handler};

use axum::extract::State;
use axum::http::Uri;

use crate::domain::ApiProblem;
use crate::error::HalError;
use crate::render::{RenderModel, RenderedDocument};
use crate::state::AppState;

/// Answers unknown paths with a `404` problem document.
pub async fn not_found_handler(State(state): State<AppState>, uri: Uri) -> RenderedDocument {
    let problem = ApiProblem::new(404, format!("No resource at {}", uri.path()));
    respond(&state, Ok(problem.into()))
}

/// Renders a model, turning any error into a `500` problem.
pub(crate) fn respond(state: &AppState, model: Result<RenderModel, HalError>) -> RenderedDocument {
    match model {
        Ok(model) => state.renderer.render_or_problem(&model),
        Err(err) => {
            tracing::error!(error = %err, "Failed to build response model");
            state
                .renderer
                .render_or_problem(&ApiProblem::from_error(500, &err).into())
        }
    }
}
