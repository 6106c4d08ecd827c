//! CLI command implementations.

pub mod check;
pub mod get;
pub mod list;
pub mod partners;
pub mod scope;
