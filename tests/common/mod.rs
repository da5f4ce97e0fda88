#![allow(dead_code)]

use std::sync::Arc;

use hal_renderer::config::Config;
use hal_renderer::prelude::*;
use hal_renderer::state::AppState;
use serde_json::{Value, json};

pub const SERVER_URL: &str = "https://api.example.com";

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "debug".to_string(),
        log_format: "text".to_string(),
        server_url: SERVER_URL.to_string(),
        display_exceptions: false,
        pretty_json: false,
        default_page_size: 10,
        max_page_size: 100,
        render_embedded: true,
        catalog_size: 25,
    }
}

pub fn create_test_state() -> AppState {
    AppState::from_config(&test_config()).unwrap()
}

pub fn create_state_with(config: Config) -> AppState {
    AppState::from_config(&config).unwrap()
}

pub fn routes() -> RouteTable {
    RouteTable::new()
        .with_route("widget", "/widgets/{id}")
        .unwrap()
        .with_route("widgets", "/widgets")
        .unwrap()
        .with_route("manufacturer", "/manufacturers/{id}")
        .unwrap()
        .with_route("user", "/users/{user_id}[/{tab}]")
        .unwrap()
}

pub fn link_renderer() -> LinkRenderer {
    let host = StaticHostUrl::new(SERVER_URL).unwrap();
    LinkRenderer::new(Arc::new(routes()), Arc::new(host))
}

pub fn renderer() -> DocumentRenderer {
    DocumentRenderer::new(link_renderer())
}

/// Serializer that escapes every `/`, like encoders that do so by default.
pub fn escaping_renderer() -> DocumentRenderer {
    renderer().with_serializer(JsonSerializer {
        escape_slashes: true,
        ..JsonSerializer::default()
    })
}

pub fn params(value: Value) -> RouteParams {
    value.as_object().cloned().unwrap()
}

pub fn widget(id: i64) -> HalResource {
    HalResource::from_object(json!({ "id": id, "name": format!("widget {id}") }), "id")
        .unwrap()
        .with_link(Link::from_route("self", "widget", params(json!({ "id": id }))).unwrap())
}

pub fn body(document: &RenderedDocument) -> Value {
    serde_json::from_str(document.body()).unwrap()
}
