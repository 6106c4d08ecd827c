//! Loading the shipped sample documents and the documented lookup scenarios.

mod common;

use std::sync::Arc;

use fedconf::domain::models::{EndpointPurpose, HTTP_REDIRECT_BINDING};
use fedconf::{ConfigRegistry, Days, RegistryError, RegistrySource, Schema, ValueOrigin};

use common::{required_settings, sample_registry};

#[test]
fn test_sample_settings_resolve_typed_values() {
    let registry = sample_registry();

    assert_eq!(registry.get::<u64>("max_transfer_size").unwrap(), 2_107_374_182_400);
    assert_eq!(registry.get::<String>("db_type").unwrap(), "pgsql");
    assert!(registry.get::<bool>("terasender_enabled").unwrap());
    assert_eq!(registry.get::<i64>("terasender_worker_count").unwrap(), 5);
    assert_eq!(registry.get::<Days>("max_transfer_days_valid").unwrap(), Days(60));
    assert_eq!(
        registry
            .get::<chrono::Duration>("default_transfer_days_valid")
            .unwrap(),
        chrono::Duration::days(20)
    );
}

#[test]
fn test_sample_defaults_fill_unset_entries() {
    let registry = sample_registry();

    let name_attribute = registry.entry("auth_sp_saml_name_attribute").unwrap();
    assert_eq!(name_attribute.origin(), Some(ValueOrigin::Default));
    assert_eq!(
        registry.get::<String>("auth_sp_saml_name_attribute").unwrap(),
        "cn"
    );
    assert_eq!(
        registry.entry("site_url").unwrap().origin(),
        Some(ValueOrigin::Explicit)
    );
}

#[test]
fn test_sample_partner() {
    let registry = sample_registry();
    assert_eq!(registry.partner_count(), 2);

    let idp = registry.resolve_partner("https://idp-test.feide.no").unwrap();
    assert_eq!(
        idp.display_name("no"),
        "Feide - Norske utdanningsinstitusjoner (test-IdP)"
    );
    let sso = idp
        .endpoint(EndpointPurpose::SingleSignOnService, Some(HTTP_REDIRECT_BINDING))
        .unwrap();
    assert_eq!(
        sso.location,
        "https://idp-test.feide.no/simplesaml/saml2/idp/SSOService.php"
    );
    assert!(idp.certificate.der().is_some_and(|der| der.len() > 500));
    assert!(idp.admits("alice@uninett.no"));
    assert!(!idp.admits("alice@example.com"));

    let guest = registry.resolve_partner("https://openidp.feide.no").unwrap();
    assert_eq!(guest.display_name("no"), "Feide Gjestebrukere");
    assert_eq!(guest.endpoints(EndpointPurpose::SingleLogoutService).len(), 1);
    assert!(guest.scope.is_none());
}

#[test]
fn test_transfer_size_lookup() {
    let source = RegistrySource::from_yaml("settings:\n  max_transfer_size: 2107374182400\n", "")
        .unwrap();
    let registry = ConfigRegistry::load(source).unwrap();
    assert_eq!(
        registry.get::<i64>("max_transfer_size").unwrap(),
        2_107_374_182_400
    );
}

#[test]
fn test_partner_scope_lookup() {
    let metadata = r"
https://idp-test.example:
  SingleSignOnService:
    - Binding: urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect
      Location: https://idp-test.example/sso
  certFingerprint: C9:ED:4D:FB:07:CA:F1:3F:C2:1E:0F:EC:15:72:04:7E:B8:A7:A4:CB
  scope: [example.org]
";
    let registry = ConfigRegistry::load(RegistrySource::from_yaml("", metadata).unwrap()).unwrap();

    let partner = registry.resolve_partner("https://idp-test.example").unwrap();
    assert_eq!(partner.scope, Some(vec!["example.org".to_string()]));
    assert_eq!(
        partner.certificate.fingerprints,
        vec!["c9ed4dfb07caf13fc21e0fec1572047eb8a7a4cb".to_string()]
    );
    assert_eq!(
        registry.resolve_partner("https://unknown.example").unwrap_err(),
        RegistryError::UnknownPartner("https://unknown.example".to_string())
    );
}

#[test]
fn test_builtin_required_keys() {
    let registry = ConfigRegistry::load(
        RegistrySource::from_yaml(&required_settings(), "")
            .unwrap()
            .with_base_schema(Schema::filesender()),
    )
    .unwrap();
    assert_eq!(registry.get::<i64>("terasender_worker_count").unwrap(), 2);
    assert_eq!(registry.get::<Days>("max_transfer_days_valid").unwrap(), Days(20));

    let without_storage = required_settings().replace("  storage_type: filesystem\n", "");
    let err = ConfigRegistry::load(
        RegistrySource::from_yaml(&without_storage, "")
            .unwrap()
            .with_base_schema(Schema::filesender()),
    )
    .unwrap_err();
    assert_eq!(err, RegistryError::MissingRequiredKey("storage_type".to_string()));
}

#[test]
fn test_invalid_partner_rejects_whole_load() {
    let metadata = r"
https://good.example:
  certData: AQID
https://bad.example:
  SingleSignOnService:
    - Binding: urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect
  certData: AQID
";
    let err = ConfigRegistry::load(RegistrySource::from_yaml("", metadata).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MalformedEntry { ref key, .. } if key == "https://bad.example"
    ));
}

#[test]
fn test_unreadable_document() {
    let dir = tempfile::tempdir().unwrap();
    let err = RegistrySource::from_files(dir.path().join("missing.yaml"), dir.path().join("x.yaml"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidSource { .. }));
}

#[test]
fn test_concurrent_reads_share_one_registry() {
    let registry = Arc::new(sample_registry());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(
                        registry.get::<u64>("max_transfer_size").unwrap(),
                        2_107_374_182_400
                    );
                    assert!(registry
                        .resolve_partner("https://idp-test.feide.no")
                        .is_ok());
                    assert_eq!(registry.partners_for_scope("feide.no").count(), 1);
                }
            });
        }
    });
}
