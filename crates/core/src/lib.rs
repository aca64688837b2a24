//! Domain core for the scaffold fleet manager.
//!
//! Pure logic with no database dependencies: the component entity and its
//! enum-valued fields, the record validator, and the fleet query engine.
//! Storage access happens only through the [`validation::ComponentDirectory`]
//! capability injected by the caller.

pub mod component;
pub mod error;
pub mod fleet;
pub mod types;
pub mod validation;
