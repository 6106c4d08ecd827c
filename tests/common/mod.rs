//! Shared fixtures for integration tests.

#![allow(dead_code)]

use fedconf::{ConfigRegistry, RegistrySource, Schema};

/// The sample settings document shipped in `config/`.
pub const SAMPLE_SETTINGS: &str = include_str!("../../config/filesender.yaml");

/// The sample federation metadata document shipped in `config/`.
pub const SAMPLE_METADATA: &str = include_str!("../../config/saml20-idp-remote.yaml");

/// Load the shipped samples against the built-in schema.
pub fn sample_registry() -> ConfigRegistry {
    let source = RegistrySource::from_yaml(SAMPLE_SETTINGS, SAMPLE_METADATA)
        .expect("sample documents parse")
        .with_base_schema(Schema::filesender());
    ConfigRegistry::load(source).expect("sample documents load")
}

/// A minimal settings document that satisfies every required built-in entry.
pub fn required_settings() -> String {
    [
        "settings:",
        "  site_url: https://filesender.example.org",
        "  admin: admin@example.org",
        "  admin_email: ops@example.org",
        "  db_type: pgsql",
        "  db_host: localhost",
        "  db_database: filesender",
        "  db_username: filesender",
        "  db_password: secret",
        "  auth_sp_saml_simplesamlphp_url: /simplesaml/",
        "  auth_sp_saml_simplesamlphp_location: /opt/simplesaml/",
        "  storage_type: filesystem",
        "  storage_filesystem_path: /srv/files",
        "",
    ]
    .join("\n")
}
