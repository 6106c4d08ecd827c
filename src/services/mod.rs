//! Service layer
//!
//! The registry and the schema it is loaded against.

pub mod registry;
pub mod schema;

pub use registry::ConfigRegistry;
pub use schema::Schema;
