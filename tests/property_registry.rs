use fedconf::{ConfigRegistry, Days, RegistryError, RegistrySource, ValueKind};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_filter("YAML keyword", |key| {
        !matches!(key.as_str(), "null" | "true" | "false")
    })
}

proptest! {
    /// Property: an integer entry reads back as the value it was given
    #[test]
    fn prop_integer_round_trips(key in key_strategy(), value in any::<i64>()) {
        let settings = format!("schema:\n  - {{ key: {key}, type: integer }}\nsettings:\n  {key}: {value}\n");
        let registry = ConfigRegistry::load(RegistrySource::from_yaml(&settings, "").unwrap()).unwrap();
        prop_assert_eq!(registry.get::<i64>(&key).unwrap(), value);
    }

    /// Property: a days entry declared with only a default resolves to it
    #[test]
    fn prop_days_default_applies(key in key_strategy(), days in 0u32..3650) {
        let settings = format!("schema:\n  - {{ key: {key}, type: days, default: {days} }}\n");
        let registry = ConfigRegistry::load(RegistrySource::from_yaml(&settings, "").unwrap()).unwrap();
        prop_assert_eq!(registry.get::<Days>(&key).unwrap(), Days(days));
        prop_assert_eq!(registry.entry(&key).unwrap().kind, ValueKind::Days);
    }

    /// Property: repeating any key fails the load and names that key
    #[test]
    fn prop_duplicate_key_rejected(
        keys in proptest::collection::btree_set(key_strategy(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<_> = keys.into_iter().collect();
        let repeated = pick.get(&keys).clone();

        let mut settings = String::from("settings:\n");
        for (i, key) in keys.iter().enumerate() {
            settings.push_str(&format!("  {key}: {i}\n"));
        }
        settings.push_str(&format!("  {repeated}: again\n"));

        let err = ConfigRegistry::load(RegistrySource::from_yaml(&settings, "").unwrap()).unwrap_err();
        prop_assert_eq!(err, RegistryError::DuplicateKey(repeated));
    }

    /// Property: a partner admits every subdomain of its scope and nothing
    /// that merely ends with the same characters
    #[test]
    fn prop_scope_subdomains(label in "[a-z]{1,10}", domain in "[a-z]{2,10}\\.(org|no|edu)") {
        let metadata = format!("https://idp.example:\n  certData: AQID\n  scope: [{domain}]\n");
        let registry = ConfigRegistry::load(RegistrySource::from_yaml("", &metadata).unwrap()).unwrap();
        let partner = registry.resolve_partner("https://idp.example").unwrap();

        let subdomain = format!("{label}.{domain}");
        let lookalike = format!("{label}{domain}");
        let principal = format!("{label}@{domain}");
        prop_assert!(partner.admits(&subdomain));
        prop_assert!(partner.admits(&principal));
        prop_assert!(!partner.admits(&lookalike));
    }
}
