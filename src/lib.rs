//! fedconf - typed configuration and federation partner registry
//!
//! fedconf loads two static definition documents for a FileSender
//! deployment: a settings document (typed entries with declared defaults)
//! and a federation metadata document (trusted identity providers). Both are
//! validated in full at load time; afterwards the registry is immutable and
//! can be shared freely between threads.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Value types, partner records and errors
//! - **Service Layer** (`services`): Schema handling and the registry
//! - **Infrastructure Layer** (`infrastructure`): Document parsing, tool
//!   configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use fedconf::{ConfigRegistry, RegistrySource, Schema};
//!
//! # fn main() -> anyhow::Result<()> {
//! let source = RegistrySource::from_files(
//!     "config/filesender.yaml",
//!     "config/saml20-idp-remote.yaml",
//! )?
//! .with_base_schema(Schema::filesender());
//! let registry = ConfigRegistry::load(source)?;
//!
//! let max_size: u64 = registry.get("max_transfer_size")?;
//! let idp = registry.resolve_partner("https://idp-test.feide.no")?;
//! println!("{max_size} {}", idp.display_name("en"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AppConfig, ConfigEntry, ConfigValue, Days, EndpointPurpose, EntrySpec, FederationPartner,
    FromConfigValue, LoggingConfig, ValueKind, ValueOrigin,
};
pub use domain::{RegistryError, RegistryResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::source::RegistrySource;
pub use services::{ConfigRegistry, Schema};
