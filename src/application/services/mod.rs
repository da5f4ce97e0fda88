//! Application services.

pub mod widget_service;

pub use widget_service::WidgetService;
