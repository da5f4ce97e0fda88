//! Error taxonomy for link building, route assembly and rendering.
//!
//! Every failure here is a programming error surfaced immediately. The single
//! recoverable condition (a client asking for a page outside the collection)
//! is not an error at all: it comes back as an [`ApiProblem`] value from
//! [`crate::render::LinkRenderer::render_collection`].

use axum::response::{IntoResponse, Response};

use crate::domain::ApiProblem;

/// Top-level error returned by the library.
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    /// Malformed constructor or setter input (bad URL, empty relation, non-object payload).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Conflicting state (url and route on one link, building an incomplete link).
    #[error("Domain error: {0}")]
    Domain(String),

    #[error(transparent)]
    RouteAssembly(#[from] RouteAssemblyError),

    #[error(transparent)]
    Rendering(#[from] RenderingError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HalError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}

/// Failure to turn a route name and parameters into a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteAssemblyError {
    #[error("Route \"{0}\" not found")]
    UnknownRoute(String),

    #[error("Missing parameter \"{param}\" for route \"{route}\"")]
    MissingParameter { route: String, param: String },

    #[error("Invalid route template \"{template}\": {reason}")]
    InvalidTemplate { template: String, reason: String },
}

/// Structural problem in the resource graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderingError {
    #[error("Payload defines reserved key \"{key}\"")]
    ReservedKey { key: String },

    #[error("Embedded resource cycle detected at \"{href}\"")]
    Cycle { href: String },
}

impl IntoResponse for HalError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Rendering failed");
        ApiProblem::from_error(500, &self).into_response()
    }
}
