use serde::Deserialize;

use super::entries::OrderedEntries;
use crate::domain::models::{ConfigValue, EntrySpec, ValueKind};
use crate::domain::{RegistryError, RegistryResult};

/// Raw settings document.
///
/// ```yaml
/// schema:
///   - key: max_transfer_days_valid
///     type: days
///     default: 20
/// settings:
///   site_url: https://filesender.example.org
///   max_transfer_size: 2107374182400
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsDocument {
    #[serde(default)]
    pub schema: Vec<EntryDeclaration>,

    #[serde(default)]
    pub settings: OrderedEntries<serde_yaml::Value>,
}

/// An entry declaration as written in a settings document; the default is
/// still a raw scalar until it is coerced to the declared type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryDeclaration {
    pub key: String,

    #[serde(rename = "type")]
    pub kind: ValueKind,

    #[serde(default)]
    pub default: Option<serde_yaml::Value>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,
}

impl EntryDeclaration {
    pub fn into_spec(self) -> RegistryResult<EntrySpec> {
        let default = match &self.default {
            None | Some(serde_yaml::Value::Null) => None,
            Some(raw) => Some(
                ConfigValue::coerce(self.kind, raw)
                    .map_err(|reason| RegistryError::malformed(&self.key, format!("default: {reason}")))?,
            ),
        };

        Ok(EntrySpec {
            key: self.key,
            kind: self.kind,
            default,
            required: self.required,
            description: self.description,
        })
    }
}

impl SettingsDocument {
    pub fn from_yaml_str(source_name: &str, yaml: &str) -> RegistryResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| RegistryError::invalid_source(source_name, e))
    }
}
