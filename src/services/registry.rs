//! The configuration registry.
//!
//! A registry is built once from a [`RegistrySource`] and never changes
//! afterwards. Lookups take `&self` and the type holds only owned data, so a
//! loaded registry can be shared across threads behind an `Arc` without
//! locking.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::domain::models::{ConfigEntry, ConfigValue, FederationPartner, FromConfigValue};
use crate::domain::{RegistryError, RegistryResult};
use crate::infrastructure::source::{parse_partner, RegistrySource};
use crate::services::schema::Schema;

/// Loaded configuration entries and federation partners.
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    entries: BTreeMap<String, ConfigEntry>,
    partners: BTreeMap<String, FederationPartner>,
}

impl ConfigRegistry {
    /// Build a registry from `source`.
    ///
    /// Fails on the first repeated key or partner identifier, the first
    /// value that does not coerce to its declared type, or the first required
    /// key left without a value. Nothing is returned on failure.
    #[instrument(skip_all, fields(settings = source.settings.settings.len(), partners = source.federation.partners.len()))]
    pub fn load(source: RegistrySource) -> RegistryResult<Self> {
        let RegistrySource {
            base_schema,
            settings,
            federation,
        } = source;

        let mut declared = Schema::new();
        for declaration in settings.schema {
            declared.declare(declaration.into_spec()?)?;
        }
        let mut schema = base_schema;
        for key in schema.merge(declared) {
            warn!(key = %key, "settings document redeclares built-in entry");
        }

        if let Some(key) = settings.settings.first_duplicate() {
            return Err(RegistryError::DuplicateKey(key.to_string()));
        }
        if let Some(id) = federation.partners.first_duplicate() {
            return Err(RegistryError::DuplicateKey(id.to_string()));
        }

        let mut values = BTreeMap::new();
        for (key, raw) in settings.settings.0 {
            let value = match schema.get(&key) {
                Some(spec) => ConfigValue::coerce(spec.kind, &raw),
                None => ConfigValue::infer(&raw),
            }
            .map_err(|reason| RegistryError::malformed(&key, reason))?;
            values.insert(key, value);
        }

        let mut entries = BTreeMap::new();
        for spec in schema.iter() {
            let value = values.remove(&spec.key);
            if spec.required && value.is_none() && spec.default.is_none() {
                return Err(RegistryError::MissingRequiredKey(spec.key.clone()));
            }
            entries.insert(
                spec.key.clone(),
                ConfigEntry {
                    key: spec.key.clone(),
                    kind: spec.kind,
                    value,
                    default: spec.default.clone(),
                    required: spec.required,
                },
            );
        }
        for (key, value) in values {
            debug!(key = %key, kind = %value.kind(), "undeclared entry, type inferred");
            entries.insert(
                key.clone(),
                ConfigEntry {
                    key,
                    kind: value.kind(),
                    value: Some(value),
                    default: None,
                    required: false,
                },
            );
        }

        let mut partners = BTreeMap::new();
        for (entity_id, raw) in federation.partners.0 {
            let partner = parse_partner(&entity_id, raw)?;
            debug!(
                entity_id = %entity_id,
                scope = partner.scope.as_ref().map_or(0, Vec::len),
                "registered federation partner"
            );
            partners.insert(entity_id, partner);
        }

        info!(
            entries = entries.len(),
            partners = partners.len(),
            "configuration registry loaded"
        );

        Ok(Self { entries, partners })
    }

    /// Typed value for `key`, falling back to the declared default.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> RegistryResult<T> {
        self.lookup(key)?
            .ok_or_else(|| RegistryError::MissingRequiredKey(key.to_string()))
    }

    /// Typed value for `key`, or `default` when the registry has none.
    pub fn get_or<T: FromConfigValue>(&self, key: &str, default: T) -> RegistryResult<T> {
        Ok(self.lookup(key)?.unwrap_or(default))
    }

    /// Comma-separated string entry split into trimmed, non-empty items.
    pub fn get_list(&self, key: &str) -> RegistryResult<Vec<String>> {
        let raw: String = self.get(key)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect())
    }

    /// The untyped effective value for `key`.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key).and_then(ConfigEntry::effective)
    }

    pub fn entry(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    /// Whether `key` resolves to a value (explicit or default).
    pub fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Entries in key order, including declared entries without a value.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    pub fn resolve_partner(&self, entity_id: &str) -> RegistryResult<&FederationPartner> {
        self.partners
            .get(entity_id)
            .ok_or_else(|| RegistryError::UnknownPartner(entity_id.to_string()))
    }

    /// Partners in entity identifier order.
    pub fn partners(&self) -> impl Iterator<Item = &FederationPartner> {
        self.partners.values()
    }

    /// Partners whose scope admits a domain or scoped principal.
    pub fn partners_for_scope<'a>(
        &'a self,
        principal_or_domain: &'a str,
    ) -> impl Iterator<Item = &'a FederationPartner> + 'a {
        self.partners
            .values()
            .filter(move |partner| partner.admits(principal_or_domain))
    }

    pub fn partner_count(&self) -> usize {
        self.partners.len()
    }

    fn lookup<T: FromConfigValue>(&self, key: &str) -> RegistryResult<Option<T>> {
        let Some(value) = self.value(key) else {
            return Ok(None);
        };
        T::from_config_value(value)
            .map(Some)
            .ok_or_else(|| RegistryError::TypeMismatch {
                key: key.to_string(),
                expected: T::KIND,
                found: value.kind(),
            })
    }
}
