//! Request parameter types.

pub mod pagination;
