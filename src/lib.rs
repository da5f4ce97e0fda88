//! # HAL Renderer
//!
//! HAL+JSON documents for resources, paginated collections and API problems,
//! plus a small Axum service that serves a widget catalog through them.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Links, resources, collections, paginators and problems
//! - **Routing** ([`routing`]) - Route name to URL assembly and canonical host lookup
//! - **Rendering** ([`render`]) - HAL object construction, serialization and normalization
//! - **Application Layer** ([`application`]) - Services that build HAL models for the demo
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory widget catalog
//! - **API Layer** ([`api`]) - Handlers, query parameters and middleware
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hal_renderer::prelude::*;
//!
//! let routes = RouteTable::new().with_route("widgets", "/widgets[/{id}]")?;
//! let host = StaticHostUrl::new("https://api.example.com")?;
//! let renderer = DocumentRenderer::new(LinkRenderer::new(Arc::new(routes), Arc::new(host)));
//!
//! let mut params = RouteParams::new();
//! params.insert("id".into(), 7.into());
//! let widget = HalResource::from_object(serde_json::json!({ "id": 7, "name": "Sprocket" }), "id")?
//!     .with_link(Link::from_route("self", "widgets", params)?);
//!
//! let document = renderer.render(&widget.into())?;
//! assert_eq!(
//!     document.body(),
//!     r#"{"id":7,"name":"Sprocket","_links":{"self":{"href":"/widgets/7"}}}"#
//! );
//! ```
//!
//! ## Configuration
//!
//! The demo service is configured from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod render;
pub mod routing;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::HalError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::{
        ApiProblem, CollectionItem, HalCollection, HalResource, Link, LinkBuilder, Paginator,
        PaginatorAdapter, ValidationMessage,
    };
    pub use crate::error::{HalError, RenderingError, RouteAssemblyError};
    pub use crate::render::{
        DocumentRenderer, JsonSerializer, LinkRenderer, RenderModel, RenderedDocument,
        RendererOptions,
    };
    pub use crate::routing::{RouteOptions, RouteParams, RouteTable, StaticHostUrl};
}
