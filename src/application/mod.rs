//! Application layer services.
//!
//! Services read from the infrastructure layer and return HAL models; they
//! never render. Handlers pass the models to the
//! [`crate::render::DocumentRenderer`] held in [`crate::state::AppState`].
//!
//! # Available Services
//!
//! - [`services::widget_service::WidgetService`] - Widget and manufacturer resources

pub mod services;
