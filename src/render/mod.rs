//! Rendering pipeline.
//!
//! # Flow
//!
//! 1. Application code builds a [`crate::domain::HalResource`] or [`crate::domain::HalCollection`]
//! 2. [`DocumentRenderer::render`] dispatches on the [`RenderModel`] variant
//! 3. [`LinkRenderer`] resolves links and builds the HAL object recursively
//! 4. A [`DocumentSerializer`] encodes the object
//! 5. Escaped slashes are normalized (see [`crate::utils::slashes`])

pub mod document;
pub mod hal_links;
pub mod serializer;

pub use document::{DocumentRenderer, RenderModel, RenderedDocument};
pub use hal_links::{CollectionRender, LinkRenderer, RendererOptions};
pub use serializer::{DocumentSerializer, JsonSerializer};
