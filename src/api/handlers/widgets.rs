//! Handlers for widget and manufacturer resources.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};

use crate::api::dto::pagination::PaginationParams;
use crate::api::handlers::respond;
use crate::domain::ApiProblem;
use crate::render::{RenderModel, RenderedDocument};
use crate::state::AppState;

/// Lists one page of widgets.
///
/// # Endpoint
///
/// `GET /widgets`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default and max from configuration)
///
/// # Response Codes
///
/// - **200 OK**: `application/hal+json` collection with `self`/`first`/`last`/`prev`/`next` links
/// - **400 Bad Request**: Unparseable or invalid pagination parameters
/// - **409 Conflict**: Page outside the collection
pub async fn widget_list_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> RenderedDocument {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected widget list query");
            let problem = ApiProblem::new(rejection.status().as_u16(), rejection.body_text());
            return respond(&state, Ok(problem.into()));
        }
    };

    let limits = state.page_limits;
    let (page, page_size) =
        match params.resolve(limits.default_page_size, limits.max_page_size) {
            Ok(resolved) => resolved,
            Err(messages) => {
                let problem = ApiProblem::new(400, "Invalid pagination parameters")
                    .with_validation_messages(messages);
                return respond(&state, Ok(problem.into()));
            }
        };

    let model = state
        .widget_service
        .widgets_page(page, page_size)
        .map(RenderModel::from);
    respond(&state, model)
}

/// Returns a single widget with its manufacturer embedded.
///
/// # Endpoint
///
/// `GET /widgets/{id}`
///
/// # Response Codes
///
/// - **200 OK**: `application/hal+json` resource
/// - **400 Bad Request**: Non-numeric id
/// - **404 Not Found**: Unknown id
pub async fn widget_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> RenderedDocument {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_problem(&state, rejection),
    };

    let model = state.widget_service.widget(id).map(|found| -> RenderModel {
        match found {
            Some(resource) => resource.into(),
            None => ApiProblem::new(404, format!("Widget {id} not found")).into(),
        }
    });
    respond(&state, model)
}

/// Returns a single manufacturer.
///
/// # Endpoint
///
/// `GET /manufacturers/{id}`
pub async fn manufacturer_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> RenderedDocument {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_problem(&state, rejection),
    };

    let model = state.widget_service.manufacturer(id).map(|found| -> RenderModel {
        match found {
            Some(resource) => resource.into(),
            None => ApiProblem::new(404, format!("Manufacturer {id} not found")).into(),
        }
    });
    respond(&state, model)
}

fn path_problem(state: &AppState, rejection: PathRejection) -> RenderedDocument {
    tracing::debug!(error = %rejection, "Rejected path parameter");
    let problem = ApiProblem::new(rejection.status().as_u16(), rejection.body_text());
    respond(state, Ok(problem.into()))
}
