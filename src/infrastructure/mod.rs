//! Infrastructure layer for data sources.
//!
//! # Modules
//!
//! - [`widget_store`] - In-memory catalog that doubles as a paginator source

pub mod widget_store;

pub use widget_store::{Manufacturer, Widget, WidgetStore};
