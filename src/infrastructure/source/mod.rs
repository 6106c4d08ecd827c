//! Static definition sources
//!
//! Parsers for the settings document and the federation metadata document.
//! Both keep repeated keys so the registry can reject them by name.

pub mod entries;
pub mod federation;
pub mod settings;

use std::path::Path;

use crate::domain::{RegistryError, RegistryResult};
use crate::services::schema::Schema;

pub use entries::OrderedEntries;
pub use federation::{parse_partner, FederationDocument};
pub use settings::{EntryDeclaration, SettingsDocument};

/// Everything a registry is loaded from.
#[derive(Debug, Clone, Default)]
pub struct RegistrySource {
    /// Declarations applied before the settings document's own
    pub base_schema: Schema,
    pub settings: SettingsDocument,
    pub federation: FederationDocument,
}

impl RegistrySource {
    pub fn from_yaml(settings: &str, federation: &str) -> RegistryResult<Self> {
        Ok(Self {
            base_schema: Schema::default(),
            settings: SettingsDocument::from_yaml_str("settings", settings)?,
            federation: FederationDocument::from_yaml_str("federation", federation)?,
        })
    }

    pub fn from_files(settings: impl AsRef<Path>, federation: impl AsRef<Path>) -> RegistryResult<Self> {
        let settings_name = settings.as_ref().display().to_string();
        let federation_name = federation.as_ref().display().to_string();

        let settings_yaml = std::fs::read_to_string(settings.as_ref())
            .map_err(|e| RegistryError::invalid_source(&settings_name, e))?;
        let federation_yaml = std::fs::read_to_string(federation.as_ref())
            .map_err(|e| RegistryError::invalid_source(&federation_name, e))?;

        Ok(Self {
            base_schema: Schema::default(),
            settings: SettingsDocument::from_yaml_str(&settings_name, &settings_yaml)?,
            federation: FederationDocument::from_yaml_str(&federation_name, &federation_yaml)?,
        })
    }

    #[must_use]
    pub fn with_base_schema(mut self, schema: Schema) -> Self {
        self.base_schema = schema;
        self
    }
}
