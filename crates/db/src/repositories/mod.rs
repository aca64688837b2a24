//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod component_repo;

pub use component_repo::{ComponentRepo, PgDirectory};
