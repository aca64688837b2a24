//! HTTP surface for the scaffold fleet manager.
//!
//! Thin glue around the core: handlers deserialize plain structured data,
//! delegate to the validator / query engine / repository, and map the error
//! taxonomy onto consistent JSON responses.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
