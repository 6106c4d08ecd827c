//! Infrastructure layer module
//!
//! Everything that touches the outside world:
//! - Definition source parsing (YAML settings and federation metadata)
//! - Configuration of the tool itself
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod source;
