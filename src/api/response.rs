//! Conversion of rendered documents into HTTP responses.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::domain::ApiProblem;
use crate::render::RenderedDocument;
use crate::render::document::PROBLEM_JSON;

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = self.content_type();

        (status, [(header::CONTENT_TYPE, content_type)], self.into_body()).into_response()
    }
}

/// Renders the problem without its trace.
///
/// Handlers that have a renderer at hand should prefer
/// [`crate::render::DocumentRenderer::render_api_problem`], which honors the
/// configured trace visibility.
impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Value::Object(self.to_payload(false)).to_string();

        (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HalError, RouteAssemblyError};

    #[test]
    fn test_problem_response_status_and_content_type() {
        let response = ApiProblem::new(404, "Widget 7 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
    }

    #[test]
    fn test_hal_error_becomes_internal_error() {
        let err: HalError = RouteAssemblyError::UnknownRoute("gadgets".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
    }
}
