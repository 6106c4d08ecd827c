use serde::{Deserialize, Serialize};

use super::value::{ConfigValue, ValueKind};

/// Declaration of a configuration entry: its type, default and whether
/// a value must be present once defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySpec {
    pub key: String,

    #[serde(rename = "type")]
    pub kind: ValueKind,

    pub default: Option<ConfigValue>,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntrySpec {
    pub fn new(key: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            kind,
            default: None,
            required: false,
            description: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: ConfigValue) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where an entry's effective value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueOrigin {
    /// Set explicitly in the settings document
    Explicit,
    /// Taken from the declared default
    Default,
}

/// A loaded configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub kind: ValueKind,
    pub value: Option<ConfigValue>,
    pub default: Option<ConfigValue>,
    pub required: bool,
}

impl ConfigEntry {
    /// The value lookups see: the explicit value, else the default.
    pub fn effective(&self) -> Option<&ConfigValue> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub fn origin(&self) -> Option<ValueOrigin> {
        if self.value.is_some() {
            Some(ValueOrigin::Explicit)
        } else if self.default.is_some() {
            Some(ValueOrigin::Default)
        } else {
            None
        }
    }
}
