//! Demo service configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export SERVER_URL="https://api.example.com"
//! export DISPLAY_EXCEPTIONS="false"
//! export PRETTY_JSON="false"
//! export DEFAULT_PAGE_SIZE="10"
//! export MAX_PAGE_SIZE="100"
//! export RENDER_EMBEDDED="true"
//! export CATALOG_SIZE="25"
//! ```
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `SERVER_URL` - Origin used for canonical links (default: `http://localhost:3000`)
//! - `DISPLAY_EXCEPTIONS` - Include traces in problem documents (default: `false`)
//! - `PRETTY_JSON` - Pretty-print documents (default: `false`)
//! - `DEFAULT_PAGE_SIZE` / `MAX_PAGE_SIZE` - Collection paging (defaults: 10 / 100)
//! - `RENDER_EMBEDDED` - Render embedded resources in full (default: `true`)
//! - `CATALOG_SIZE` - Number of demo widgets to seed (default: 25)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::routing::StaticHostUrl;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Origin prefixed to canonical links.
    pub server_url: String,
    /// When true, problem documents carry the error trace. Never enable in production.
    pub display_exceptions: bool,
    pub pretty_json: bool,
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// When false, embedded resources are reduced to their `_links`.
    pub render_embedded: bool,
    pub catalog_size: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let server_url =
            env::var("SERVER_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            server_url,
            display_exceptions: load_bool("DISPLAY_EXCEPTIONS", false),
            pretty_json: load_bool("PRETTY_JSON", false),
            default_page_size: load_number("DEFAULT_PAGE_SIZE", 10)?,
            max_page_size: load_number("MAX_PAGE_SIZE", 100)?,
            render_embedded: load_bool("RENDER_EMBEDDED", true),
            catalog_size: load_number("CATALOG_SIZE", 25)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `server_url` is not an HTTP(S) URL
    /// - page sizes are zero, inverted, or `max_page_size` exceeds 1000
    /// - `catalog_size` exceeds 100000
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        StaticHostUrl::new(&self.server_url).context("SERVER_URL is invalid")?;

        if self.max_page_size == 0 || self.max_page_size > 1000 {
            anyhow::bail!(
                "MAX_PAGE_SIZE must be between 1 and 1000, got {}",
                self.max_page_size
            );
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            anyhow::bail!(
                "DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({}), got {}",
                self.max_page_size,
                self.default_page_size
            );
        }

        if self.catalog_size > 100_000 {
            anyhow::bail!(
                "CATALOG_SIZE is too large (max: 100000), got {}",
                self.catalog_size
            );
        }

        Ok(())
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Server URL: {}", self.server_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Page size: {} (max {})",
            self.default_page_size,
            self.max_page_size
        );
        tracing::info!("  Render embedded: {}", self.render_embedded);
        tracing::info!("  Pretty JSON: {}", self.pretty_json);
        tracing::info!("  Catalog size: {}", self.catalog_size);

        if self.display_exceptions {
            tracing::warn!("  Display exceptions: enabled (traces are sent to clients)");
        }
    }
}

/// Reads a boolean flag; `true`/`1` (any case) is true, anything else is false.
fn load_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

fn load_number<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
