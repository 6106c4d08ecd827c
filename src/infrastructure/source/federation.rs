//! Federation metadata documents.
//!
//! Records use the SimpleSAMLphp `saml20-idp-remote` field names, keyed by
//! entity identifier:
//!
//! ```yaml
//! https://idp-test.example:
//!   SingleSignOnService:
//!     - Binding: urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect
//!       Location: https://idp-test.example/sso
//!   certData: MIIDkDCCAngCCQ...
//!   scope: [example.org]
//! ```

use std::collections::BTreeMap;

use base64::Engine;
use serde::Deserialize;

use super::entries::OrderedEntries;
use crate::domain::models::{
    Certificate, Contact, Endpoint, EndpointPurpose, FederationPartner, LocalizedString,
    Organization, HTTP_REDIRECT_BINDING,
};
use crate::domain::{RegistryError, RegistryResult};

/// Raw federation document: entity id -> unparsed record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FederationDocument {
    pub partners: OrderedEntries<serde_yaml::Value>,
}

impl FederationDocument {
    pub fn from_yaml_str(source_name: &str, yaml: &str) -> RegistryResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| RegistryError::invalid_source(source_name, e))
    }
}

#[derive(Debug, Deserialize)]
struct PartnerRecord {
    #[serde(default, rename = "entityid")]
    entity_id: Option<String>,

    #[serde(default, rename = "metadata-set")]
    metadata_set: Option<String>,

    #[serde(default)]
    name: Option<LocalizedString>,

    #[serde(default)]
    description: Option<LocalizedString>,

    #[serde(default, rename = "SingleSignOnService")]
    single_sign_on: Option<EndpointList>,

    #[serde(default, rename = "SingleLogoutService")]
    single_logout: Option<EndpointList>,

    #[serde(default, rename = "ArtifactResolutionService")]
    artifact_resolution: Option<EndpointList>,

    #[serde(default, rename = "certData")]
    cert_data: Option<String>,

    #[serde(default, rename = "certFingerprint")]
    cert_fingerprint: Option<OneOrMany>,

    #[serde(default, rename = "NameIDFormat")]
    name_id_format: Option<String>,

    #[serde(default, rename = "OrganizationName")]
    organization_name: Option<LocalizedString>,

    #[serde(default, rename = "OrganizationDisplayName")]
    organization_display_name: Option<LocalizedString>,

    #[serde(default, rename = "OrganizationURL")]
    organization_url: Option<LocalizedString>,

    #[serde(default)]
    scope: Option<Vec<String>>,

    #[serde(default)]
    contacts: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EndpointList {
    Location(String),
    Bindings(Vec<BindingRecord>),
}

#[derive(Debug, Deserialize)]
struct BindingRecord {
    #[serde(default, rename = "Binding")]
    binding: Option<String>,

    #[serde(default, rename = "Location")]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

const SAML20_IDP_REMOTE: &str = "saml20-idp-remote";

/// Validate one raw record registered under `entity_id`.
pub fn parse_partner(entity_id: &str, raw: serde_yaml::Value) -> RegistryResult<FederationPartner> {
    let record: PartnerRecord =
        serde_yaml::from_value(raw).map_err(|e| RegistryError::malformed(entity_id, e.to_string()))?;

    if let Some(declared) = record.entity_id.as_deref() {
        if declared != entity_id {
            return Err(RegistryError::malformed(
                entity_id,
                format!("entityid '{declared}' does not match the key it is registered under"),
            ));
        }
    }
    if let Some(set) = record.metadata_set.as_deref() {
        if set != SAML20_IDP_REMOTE {
            return Err(RegistryError::malformed(
                entity_id,
                format!("metadata-set '{set}' is not {SAML20_IDP_REMOTE}"),
            ));
        }
    }

    let mut endpoints = BTreeMap::new();
    for (purpose, list) in [
        (EndpointPurpose::SingleSignOnService, record.single_sign_on),
        (EndpointPurpose::SingleLogoutService, record.single_logout),
        (EndpointPurpose::ArtifactResolutionService, record.artifact_resolution),
    ] {
        if let Some(list) = list {
            let parsed = parse_endpoints(entity_id, purpose, list)?;
            if !parsed.is_empty() {
                endpoints.insert(purpose, parsed);
            }
        }
    }

    let certificate = parse_certificate(entity_id, record.cert_data, record.cert_fingerprint)?;

    Ok(FederationPartner {
        entity_id: entity_id.to_string(),
        name: record.name.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        endpoints,
        certificate,
        name_id_format: record.name_id_format,
        organization: Organization {
            name: record.organization_name.unwrap_or_default(),
            display_name: record.organization_display_name.unwrap_or_default(),
            url: record.organization_url.unwrap_or_default(),
        },
        scope: record.scope,
        contacts: record.contacts,
    })
}

fn parse_endpoints(
    entity_id: &str,
    purpose: EndpointPurpose,
    list: EndpointList,
) -> RegistryResult<Vec<Endpoint>> {
    match list {
        EndpointList::Location(location) => Ok(vec![Endpoint {
            binding: HTTP_REDIRECT_BINDING.to_string(),
            location,
        }]),
        EndpointList::Bindings(records) => records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match (record.binding, record.location) {
                (Some(binding), Some(location)) if !binding.is_empty() && !location.is_empty() => {
                    Ok(Endpoint { binding, location })
                }
                (binding, _) => {
                    let missing = if binding.is_some_and(|b| !b.is_empty()) {
                        "Location"
                    } else {
                        "Binding"
                    };
                    Err(RegistryError::malformed(
                        entity_id,
                        format!("{purpose}[{index}] has no {missing}"),
                    ))
                }
            })
            .collect(),
    }
}

fn parse_certificate(
    entity_id: &str,
    data: Option<String>,
    fingerprint: Option<OneOrMany>,
) -> RegistryResult<Certificate> {
    let data = data
        .map(|raw| raw.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|d| !d.is_empty());

    if let Some(data) = &data {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| RegistryError::malformed(entity_id, format!("certData is not valid base64: {e}")))?;
    }

    let fingerprints = match fingerprint {
        None => vec![],
        Some(OneOrMany::One(f)) => vec![f],
        Some(OneOrMany::Many(list)) => list,
    }
    .into_iter()
    .map(|raw| normalize_fingerprint(&raw).ok_or_else(|| {
        RegistryError::malformed(entity_id, format!("certFingerprint '{raw}' is not a SHA-1 hex digest"))
    }))
    .collect::<RegistryResult<Vec<_>>>()?;

    if data.is_none() && fingerprints.is_empty() {
        return Err(RegistryError::malformed(
            entity_id,
            "no certificate material (certData or certFingerprint)",
        ));
    }

    Ok(Certificate { data, fingerprints })
}

fn normalize_fingerprint(raw: &str) -> Option<String> {
    let hex: String = raw
        .chars()
        .filter(|c| *c != ':')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())).then_some(hex)
}
