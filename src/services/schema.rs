//! Entry declarations.
//!
//! A schema says which keys exist, what type each holds, which must end up
//! with a value, and the default used when the settings document is silent.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::{ConfigValue, Days, EntrySpec, ValueKind};
use crate::domain::{RegistryError, RegistryResult};

/// A set of entry declarations keyed by entry key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    specs: BTreeMap<String, EntrySpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Declaring the same key twice is an error.
    pub fn declare(&mut self, spec: EntrySpec) -> RegistryResult<()> {
        if self.specs.contains_key(&spec.key) {
            return Err(RegistryError::DuplicateKey(spec.key));
        }
        self.specs.insert(spec.key.clone(), spec);
        Ok(())
    }

    /// Layer `other` over this schema; its declarations replace ours.
    /// Returns the keys that were replaced.
    pub fn merge(&mut self, other: Self) -> Vec<String> {
        let mut replaced = Vec::new();
        for (key, spec) in other.specs {
            if self.specs.insert(key.clone(), spec).is_some() {
                replaced.push(key);
            }
        }
        replaced
    }

    pub fn get(&self, key: &str) -> Option<&EntrySpec> {
        self.specs.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntrySpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Declarations for a FileSender deployment.
    ///
    /// The required set is what a fresh installation must fill in before
    /// the application starts; defaults are the values FileSender assumes
    /// when an option is left out.
    pub fn filesender() -> Self {
        use ValueKind::{Boolean, Integer, String as Str};

        let text = |v: &str| ConfigValue::String(v.to_string());
        let specs = [
            // General
            EntrySpec::new("site_url", Str).required().describe("URL of the application"),
            EntrySpec::new("admin", Str)
                .required()
                .describe("Administrator UIDs, comma separated"),
            EntrySpec::new("admin_email", Str)
                .required()
                .describe("Administrator email addresses, comma separated"),
            EntrySpec::new("email_reply_to", Str).describe("Default no-reply address"),
            EntrySpec::new("Default_TimeZone", Str).with_default(text("UTC")),
            // Transfers
            EntrySpec::new("max_transfer_size", Integer).describe("Maximum transfer size in bytes"),
            EntrySpec::new("stalling_detection", Boolean).with_default(ConfigValue::Boolean(false)),
            EntrySpec::new("max_transfer_days_valid", ValueKind::Days)
                .with_default(ConfigValue::Days(Days(20)))
                .describe("Latest expiry offered to users"),
            EntrySpec::new("default_transfer_days_valid", ValueKind::Days)
                .with_default(ConfigValue::Days(Days(10)))
                .describe("Expiry preselected for new transfers"),
            // High speed upload
            EntrySpec::new("terasender_enabled", Boolean).with_default(ConfigValue::Boolean(false)),
            EntrySpec::new("terasender_advanced", Boolean).with_default(ConfigValue::Boolean(false)),
            EntrySpec::new("terasender_worker_count", Integer)
                .with_default(ConfigValue::Integer(2))
                .describe("Upload workers started per browser"),
            EntrySpec::new("terasender_start_mode", Str).with_default(text("multiple")),
            // Database
            EntrySpec::new("db_type", Str).required().describe("pgsql or mysql"),
            EntrySpec::new("db_host", Str).required(),
            EntrySpec::new("db_database", Str).required(),
            EntrySpec::new("db_username", Str).required(),
            EntrySpec::new("db_password", Str).required(),
            // Authentication
            EntrySpec::new("auth_sp_type", Str).with_default(text("saml")),
            EntrySpec::new("auth_sp_saml_simplesamlphp_url", Str).required(),
            EntrySpec::new("auth_sp_saml_simplesamlphp_location", Str).required(),
            EntrySpec::new("auth_sp_saml_email_attribute", Str).with_default(text("mail")),
            EntrySpec::new("auth_sp_saml_name_attribute", Str).with_default(text("cn")),
            EntrySpec::new("auth_sp_saml_uid_attribute", Str)
                .with_default(text("eduPersonTargetedID")),
            EntrySpec::new("auth_sp_saml_authentication_source", Str)
                .with_default(text("default-sp")),
            // Storage
            EntrySpec::new("storage_type", Str).required(),
            EntrySpec::new("storage_filesystem_path", Str).required(),
        ];

        Self {
            specs: specs
                .into_iter()
                .map(|spec| (spec.key.clone(), spec))
                .collect(),
        }
    }
}

impl FromIterator<EntrySpec> for Schema {
    fn from_iter<I: IntoIterator<Item = EntrySpec>>(iter: I) -> Self {
        Self {
            specs: iter
                .into_iter()
                .map(|spec| (spec.key.clone(), spec))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_rejects_redeclaration() {
        let mut schema = Schema::new();
        schema
            .declare(EntrySpec::new("site_url", ValueKind::String))
            .unwrap();
        let err = schema
            .declare(EntrySpec::new("site_url", ValueKind::Integer))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("site_url".to_string()));
        assert_eq!(schema.get("site_url").unwrap().kind, ValueKind::String);
    }

    #[test]
    fn test_merge_replaces_declarations() {
        let mut base = Schema::filesender();
        let overlay: Schema = [
            EntrySpec::new("terasender_worker_count", ValueKind::Integer)
                .with_default(ConfigValue::Integer(5)),
            EntrySpec::new("custom_banner", ValueKind::String),
        ]
        .into_iter()
        .collect();

        let replaced = base.merge(overlay);
        assert_eq!(replaced, vec!["terasender_worker_count".to_string()]);
        assert_eq!(
            base.get("terasender_worker_count").unwrap().default,
            Some(ConfigValue::Integer(5))
        );
        assert!(base.get("custom_banner").is_some());
    }

    #[test]
    fn test_filesender_defaults() {
        let schema = Schema::filesender();
        assert_eq!(
            schema.get("max_transfer_days_valid").unwrap().default,
            Some(ConfigValue::Days(Days(20)))
        );
        assert_eq!(
            schema.get("default_transfer_days_valid").unwrap().default,
            Some(ConfigValue::Days(Days(10)))
        );

        let required: Vec<_> = schema
            .iter()
            .filter(|s| s.required)
            .map(|s| s.key.as_str())
            .collect();
        assert!(required.contains(&"site_url"));
        assert!(required.contains(&"db_password"));
        assert!(!required.contains(&"max_transfer_size"));

        // A required entry with a default could never fail the check.
        assert!(schema.iter().all(|s| !(s.required && s.default.is_some())));
        assert!(schema
            .iter()
            .all(|s| s.default.as_ref().is_none_or(|d| d.kind() == s.kind)));
    }
}
