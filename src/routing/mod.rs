//! URL assembly seams used while rendering links.
//!
//! The renderer never knows how routes are stored. It asks a [`UrlBuilder`]
//! for the href of a named route and a [`HostUrlProvider`] for the scheme and
//! host when a canonical (absolute) URL is requested.
//!
//! # Implementations
//!
//! - [`RouteTable`] - named templates such as `/widgets[/{id}]`
//! - [`StaticHostUrl`] - fixed base URL taken from configuration

pub mod host;
pub mod route_table;

pub use host::StaticHostUrl;
pub use route_table::RouteTable;

use serde_json::{Map, Value};

use crate::error::RouteAssemblyError;

/// Route parameters, keyed by placeholder name.
pub type RouteParams = Map<String, Value>;

/// Assembly options for a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    /// Query parameters appended after the path, in order.
    pub query: Vec<(String, String)>,
    /// Prefix the assembled path with the current host URL.
    pub force_canonical: bool,
}

impl RouteOptions {
    pub fn canonical() -> Self {
        Self {
            force_canonical: true,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Builds a URL from a route name, parameters and options.
#[cfg_attr(test, mockall::automock)]
pub trait UrlBuilder: Send + Sync {
    /// # Errors
    ///
    /// Returns [`RouteAssemblyError::UnknownRoute`] for unknown names and
    /// [`RouteAssemblyError::MissingParameter`] when a required placeholder
    /// has no value.
    fn assemble(
        &self,
        name: &str,
        params: &RouteParams,
        options: &RouteOptions,
    ) -> Result<String, RouteAssemblyError>;
}

/// Provides `scheme://host[:port]` of the current request.
#[cfg_attr(test, mockall::automock)]
pub trait HostUrlProvider: Send + Sync {
    fn current_host_url(&self) -> String;
}
