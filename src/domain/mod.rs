//! Domain layer for the configuration registry
//!
//! Value types, entry declarations, federation partner records and the
//! registry error taxonomy. Nothing here performs I/O.

pub mod errors;
pub mod models;

pub use errors::{RegistryError, RegistryResult};
