//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::WidgetService;
use crate::config::Config;
use crate::error::HalError;
use crate::infrastructure::WidgetStore;
use crate::render::{DocumentRenderer, JsonSerializer, LinkRenderer, RendererOptions};
use crate::routing::StaticHostUrl;

/// Page size bounds applied to list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<DocumentRenderer>,
    pub widget_service: Arc<WidgetService>,
    pub page_limits: PageLimits,
}

impl AppState {
    /// Wires the renderer and services from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`] if the server URL or a route template is invalid.
    pub fn from_config(config: &Config) -> Result<Self, HalError> {
        let routes = WidgetService::routes()?;
        let host = StaticHostUrl::new(&config.server_url)?;

        let links = LinkRenderer::new(Arc::new(routes), Arc::new(host)).with_options(
            RendererOptions {
                render_embedded_resources: config.render_embedded,
                ..RendererOptions::default()
            },
        );

        let renderer = DocumentRenderer::new(links)
            .with_serializer(JsonSerializer {
                pretty: config.pretty_json,
                ..JsonSerializer::default()
            })
            .display_exceptions(config.display_exceptions);

        let store = Arc::new(WidgetStore::seeded(config.catalog_size));

        Ok(Self {
            renderer: Arc::new(renderer),
            widget_service: Arc::new(WidgetService::new(store)),
            page_limits: PageLimits {
                default_page_size: config.default_page_size,
                max_page_size: config.max_page_size,
            },
        })
    }
}
