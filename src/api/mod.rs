//! REST API layer.
//!
//! # Modules
//!
//! - [`dto`] - Query parameter types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`response`] - `IntoResponse` for rendered documents and problems
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
