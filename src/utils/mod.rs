//! Helpers shared by the link and rendering layers.
//!
//! - [`uri`] - Link URL validation
//! - [`slashes`] - Escaped-slash normalization of serialized JSON

pub mod slashes;
pub mod uri;
