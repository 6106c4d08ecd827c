//! Federation partner records.
//!
//! A partner is an identity provider this deployment trusts: where to send
//! users to sign in and out, which certificate its responses are signed
//! with, how to present it in a chooser, and which home domains it may
//! assert identities for.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The binding assumed when an endpoint is given as a bare location.
pub const HTTP_REDIRECT_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";

/// Language used when a requested translation is missing.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Text available in one or more languages.
///
/// Deserializes from either a `language -> text` map or a plain string,
/// which is stored under [`FALLBACK_LANGUAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocalizedRepr", into = "BTreeMap<String, String>")]
pub struct LocalizedString {
    values: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    Localized(BTreeMap<String, String>),
}

impl From<LocalizedRepr> for LocalizedString {
    fn from(repr: LocalizedRepr) -> Self {
        match repr {
            LocalizedRepr::Plain(text) => Self::plain(text),
            LocalizedRepr::Localized(values) => Self { values },
        }
    }
}

impl From<LocalizedString> for BTreeMap<String, String> {
    fn from(value: LocalizedString) -> Self {
        value.values
    }
}

impl LocalizedString {
    pub fn plain(text: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(FALLBACK_LANGUAGE.to_string(), text.into());
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text for `language`, falling back to English, then to any language.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.values
            .get(language)
            .or_else(|| self.values.get(FALLBACK_LANGUAGE))
            .or_else(|| self.values.values().next())
            .map(String::as_str)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// What an endpoint is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EndpointPurpose {
    SingleSignOnService,
    SingleLogoutService,
    ArtifactResolutionService,
}

impl EndpointPurpose {
    pub const ALL: [Self; 3] = [
        Self::SingleSignOnService,
        Self::SingleLogoutService,
        Self::ArtifactResolutionService,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleSignOnService => "SingleSignOnService",
            Self::SingleLogoutService => "SingleLogoutService",
            Self::ArtifactResolutionService => "ArtifactResolutionService",
        }
    }
}

impl fmt::Display for EndpointPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol binding and the location it is reached at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub binding: String,
    pub location: String,
}

/// Signing certificate material for a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    /// Base64 DER with whitespace removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Lowercase hex SHA-1 fingerprints without separators
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fingerprints: Vec<String>,
}

impl Certificate {
    /// Decoded DER bytes, if certificate data is present.
    pub fn der(&self) -> Option<Vec<u8>> {
        use base64::Engine;

        self.data
            .as_deref()
            .and_then(|data| base64::engine::general_purpose::STANDARD.decode(data).ok())
    }
}

/// Organization display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub name: LocalizedString,
    pub display_name: LocalizedString,
    pub url: LocalizedString,
}

/// A contact person published in partner metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sur_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// A validated federation partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FederationPartner {
    pub entity_id: String,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub endpoints: BTreeMap<EndpointPurpose, Vec<Endpoint>>,
    pub certificate: Certificate,
    pub name_id_format: Option<String>,
    pub organization: Organization,
    pub scope: Option<Vec<String>>,
    pub contacts: Vec<Contact>,
}

impl FederationPartner {
    pub fn endpoints(&self, purpose: EndpointPurpose) -> &[Endpoint] {
        self.endpoints
            .get(&purpose)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First endpoint for `purpose`, preferring `binding` when given.
    pub fn endpoint(&self, purpose: EndpointPurpose, binding: Option<&str>) -> Option<&Endpoint> {
        let candidates = self.endpoints(purpose);
        match binding {
            Some(binding) => candidates.iter().find(|e| e.binding == binding),
            None => candidates.first(),
        }
    }

    /// Name to show users: the partner name, else the organization display
    /// name, else the entity identifier.
    pub fn display_name(&self, language: &str) -> &str {
        self.name
            .get(language)
            .or_else(|| self.organization.display_name.get(language))
            .unwrap_or(&self.entity_id)
    }

    /// Whether `domain` equals a scope entry or is a subdomain of one.
    pub fn admits_domain(&self, domain: &str) -> bool {
        self.matching_scope(domain).next().is_some()
    }

    /// Whether a scoped principal (`user@domain`) or a bare domain is
    /// admitted by this partner's scope.
    pub fn admits(&self, principal_or_domain: &str) -> bool {
        let domain = principal_or_domain
            .rsplit_once('@')
            .map_or(principal_or_domain, |(_, domain)| domain);
        self.admits_domain(domain)
    }

    /// Scope entries that admit `domain`.
    pub fn matching_scope<'a>(&'a self, domain: &str) -> impl Iterator<Item = &'a str> + 'a {
        let domain = domain.trim().trim_end_matches('.').to_lowercase();
        self.scope
            .iter()
            .flatten()
            .filter(move |allowed| {
                let allowed = allowed.to_lowercase();
                !domain.is_empty()
                    && (domain == allowed
                        || domain
                            .strip_suffix(allowed.as_str())
                            .is_some_and(|prefix| prefix.ends_with('.')))
            })
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner_with_scope(scope: Option<Vec<&str>>) -> FederationPartner {
        FederationPartner {
            entity_id: "https://idp-test.example".to_string(),
            name: LocalizedString::default(),
            description: LocalizedString::default(),
            endpoints: BTreeMap::new(),
            certificate: Certificate {
                data: None,
                fingerprints: vec!["c9ed4dfb07caf13fc21e0fec1572047eb8a7a4cb".to_string()],
            },
            name_id_format: None,
            organization: Organization::default(),
            scope: scope.map(|s| s.into_iter().map(String::from).collect()),
            contacts: vec![],
        }
    }

    #[test]
    fn test_localized_string_fallbacks() {
        let text: LocalizedString =
            serde_yaml::from_str("{ en: Feide, 'no': Feide Gjestebrukere }").unwrap();
        assert_eq!(text.get("no"), Some("Feide Gjestebrukere"));
        assert_eq!(text.get("de"), Some("Feide"));

        let only_norwegian: LocalizedString = serde_yaml::from_str("{ 'no': Feide }").unwrap();
        assert_eq!(only_norwegian.get("en"), Some("Feide"));

        let plain: LocalizedString = serde_yaml::from_str("Guest users").unwrap();
        assert_eq!(plain.get("fr"), Some("Guest users"));
        assert_eq!(plain.languages().collect::<Vec<_>>(), vec!["en"]);
    }

    #[test]
    fn test_scope_matches_exact_and_subdomains() {
        let partner = partner_with_scope(Some(vec!["example.org", "Uninett.no"]));
        assert!(partner.admits_domain("example.org"));
        assert!(partner.admits_domain("EXAMPLE.ORG"));
        assert!(partner.admits_domain("students.example.org"));
        assert!(partner.admits_domain("uninett.no."));
        assert!(!partner.admits_domain("badexample.org"));
        assert!(!partner.admits_domain("example.org.evil.com"));
        assert!(!partner.admits_domain(""));
        assert_eq!(
            partner.matching_scope("www.uninett.no").collect::<Vec<_>>(),
            vec!["Uninett.no"]
        );
    }

    #[test]
    fn test_scope_matches_principal() {
        let partner = partner_with_scope(Some(vec!["example.org"]));
        assert!(partner.admits("alice@example.org"));
        assert!(!partner.admits("alice@example.com"));
    }

    #[test]
    fn test_no_scope_admits_nothing() {
        let partner = partner_with_scope(None);
        assert!(!partner.admits("example.org"));
    }

    #[test]
    fn test_display_name_falls_back_to_entity_id() {
        let mut partner = partner_with_scope(None);
        assert_eq!(partner.display_name("en"), "https://idp-test.example");

        partner.organization.display_name = LocalizedString::plain("Example Federation");
        assert_eq!(partner.display_name("en"), "Example Federation");

        partner.name = LocalizedString::plain("Example IdP");
        assert_eq!(partner.display_name("nb"), "Example IdP");
    }

    #[test]
    fn test_endpoint_selection_by_binding() {
        let mut partner = partner_with_scope(None);
        partner.endpoints.insert(
            EndpointPurpose::SingleSignOnService,
            vec![
                Endpoint {
                    binding: "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST".to_string(),
                    location: "https://idp.example/post".to_string(),
                },
                Endpoint {
                    binding: HTTP_REDIRECT_BINDING.to_string(),
                    location: "https://idp.example/redirect".to_string(),
                },
            ],
        );

        let sso = EndpointPurpose::SingleSignOnService;
        assert_eq!(
            partner.endpoint(sso, Some(HTTP_REDIRECT_BINDING)).unwrap().location,
            "https://idp.example/redirect"
        );
        assert_eq!(
            partner.endpoint(sso, None).unwrap().location,
            "https://idp.example/post"
        );
        assert!(partner
            .endpoint(EndpointPurpose::SingleLogoutService, None)
            .is_none());
    }

    #[test]
    fn test_certificate_der_decoding() {
        let cert = Certificate {
            data: Some("AQID".to_string()),
            fingerprints: vec![],
        };
        assert_eq!(cert.der(), Some(vec![1, 2, 3]));
    }
}
