//! HAL resource model.
//!
//! Value types application code builds before handing them to a renderer.
//! Nothing here resolves routes or produces JSON; see [`crate::render`].
//!
//! # Architecture
//!
//! - [`link`] - Single hypermedia link and its builder
//! - [`link_collection`] - Relation name to links multimap
//! - [`resource`] - Payload + identifier + links + embedded resources
//! - [`collection`] - Plain or paginated list of items with navigation metadata
//! - [`paginator`] - Page arithmetic over a lazily sliced source
//! - [`problem`] - Structured error payload
//!
//! # Invariants
//!
//! - A [`Link`] always has exactly one target: a URL or a route
//! - A resource payload must not define `_links` or `_embedded`; the renderer rejects it
//! - Rendering never mutates the model

pub mod collection;
pub mod link;
pub mod link_collection;
pub mod paginator;
pub mod problem;
pub mod resource;

pub use collection::{CollectionItem, CollectionItems, HalCollection};
pub use link::{Link, LinkBuilder, LinkTarget, RouteSpec};
pub use link_collection::LinkCollection;
pub use paginator::{PageWindow, Paginator, PaginatorAdapter, VecAdapter};
pub use problem::{ApiProblem, ValidationMessage};
pub use resource::{Embedded, HalResource, Identifier};
