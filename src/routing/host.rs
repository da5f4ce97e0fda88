//! Fixed host URL provider.

use url::Url;

use crate::error::HalError;
use crate::routing::HostUrlProvider;

/// [`HostUrlProvider`] returning a configured origin such as `https://api.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHostUrl {
    origin: String,
}

impl StaticHostUrl {
    /// Normalizes `server_url` to its origin: lowercase host, no default port, no path.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if the URL is malformed or not HTTP(S).
    pub fn new(server_url: &str) -> Result<Self, HalError> {
        let url = Url::parse(server_url).map_err(|e| {
            HalError::invalid_argument(format!("Invalid server URL \"{server_url}\": {e}"))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HalError::invalid_argument(format!(
                    "Server URL must use http or https, got \"{other}\""
                )));
            }
        }

        Ok(Self {
            origin: url.origin().ascii_serialization(),
        })
    }
}

impl HostUrlProvider for StaticHostUrl {
    fn current_host_url(&self) -> String {
        self.origin.clone()
    }
}
