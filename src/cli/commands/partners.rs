use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::table::{list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{EndpointPurpose, FederationPartner};
use crate::services::ConfigRegistry;

#[derive(Debug, Serialize)]
pub struct PartnerRow {
    pub entity_id: String,
    pub display_name: String,
    pub sso_location: Option<String>,
    pub scope_size: usize,
}

impl PartnerRow {
    pub fn new(partner: &FederationPartner, lang: &str) -> Self {
        Self {
            entity_id: partner.entity_id.clone(),
            display_name: partner.display_name(lang).to_string(),
            sso_location: partner
                .endpoint(EndpointPurpose::SingleSignOnService, None)
                .map(|e| e.location.clone()),
            scope_size: partner.scope.as_ref().map_or(0, Vec::len),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PartnerListOutput {
    pub partners: Vec<PartnerRow>,
}

impl CommandOutput for PartnerListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["entity id", "name", "sign-on", "scope"]);
        for row in &self.partners {
            table.add_row(vec![
                row.entity_id.clone(),
                truncate(&row.display_name, 40),
                row.sso_location.clone().unwrap_or_else(|| "-".to_string()),
                row.scope_size.to_string(),
            ]);
        }
        render_list("partner", "partners", &table, self.partners.len())
    }
}

/// Handle the partners command
pub fn execute_list(registry: &ConfigRegistry, lang: &str, json: bool) {
    let partners = registry
        .partners()
        .map(|partner| PartnerRow::new(partner, lang))
        .collect();
    output(&PartnerListOutput { partners }, json);
}

#[derive(Debug, Serialize)]
pub struct PartnerDetailOutput<'a> {
    #[serde(skip)]
    lang: String,
    #[serde(flatten)]
    partner: &'a FederationPartner,
}

impl CommandOutput for PartnerDetailOutput<'_> {
    fn to_human(&self) -> String {
        let p = self.partner;
        let lang = self.lang.as_str();
        let mut out = String::new();

        let _ = writeln!(out, "\nFederation Partner:");
        let _ = writeln!(out, "─────────────────────────────────────────");
        let _ = writeln!(out, "Entity ID:     {}", p.entity_id);
        let _ = writeln!(out, "Name:          {}", p.display_name(lang));
        if let Some(description) = p.description.get(lang) {
            let _ = writeln!(out, "Description:   {description}");
        }
        if let Some(org) = p.organization.name.get(lang) {
            let _ = writeln!(out, "Organization:  {org}");
        }
        if let Some(url) = p.organization.url.get(lang) {
            let _ = writeln!(out, "URL:           {url}");
        }
        if let Some(format) = &p.name_id_format {
            let _ = writeln!(out, "NameID format: {format}");
        }

        let _ = writeln!(out, "\nEndpoints:");
        for purpose in EndpointPurpose::ALL {
            for endpoint in p.endpoints(purpose) {
                let _ = writeln!(out, "  {purpose}");
                let _ = writeln!(out, "    binding:  {}", endpoint.binding);
                let _ = writeln!(out, "    location: {}", endpoint.location);
            }
        }

        let _ = writeln!(out, "\nCertificate:");
        match p.certificate.der() {
            Some(der) => {
                let _ = writeln!(out, "  data:        {} bytes DER", der.len());
            }
            None => {
                let _ = writeln!(out, "  data:        -");
            }
        }
        for fingerprint in &p.certificate.fingerprints {
            let _ = writeln!(out, "  fingerprint: {fingerprint}");
        }

        match &p.scope {
            Some(scope) => {
                let _ = writeln!(out, "\nScope ({}):", scope.len());
                for domain in scope {
                    let _ = writeln!(out, "  {domain}");
                }
            }
            None => {
                let _ = writeln!(out, "\nScope: none");
            }
        }

        if !p.contacts.is_empty() {
            let _ = writeln!(out, "\nContacts:");
            for contact in &p.contacts {
                let name = [contact.given_name.as_deref(), contact.sur_name.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(
                    out,
                    "  {} {} <{}>",
                    contact.contact_type,
                    name,
                    contact.email_address.as_deref().unwrap_or("-")
                );
            }
        }

        out.trim_end().to_string()
    }
}

/// Handle the partner command
pub fn execute_show(
    registry: &ConfigRegistry,
    entity_id: &str,
    lang: &str,
    json: bool,
) -> Result<()> {
    let partner = registry.resolve_partner(entity_id)?;
    output(
        &PartnerDetailOutput {
            lang: lang.to_string(),
            partner,
        },
        json,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistryError;
    use crate::infrastructure::source::RegistrySource;

    const FEDERATION: &str = r"
https://idp-test.example:
  OrganizationDisplayName: { en: Example test IdP, 'no': Eksempel test-IdP }
  SingleSignOnService: https://idp-test.example/sso
  certData: AQID
  scope: [example.org]
  contacts:
    - contactType: technical
      givenName: Example
      surName: Support
      emailAddress: support@example.org
";

    fn registry() -> ConfigRegistry {
        ConfigRegistry::load(RegistrySource::from_yaml("", FEDERATION).unwrap()).unwrap()
    }

    #[test]
    fn test_partner_row() {
        let registry = registry();
        let partner = registry.resolve_partner("https://idp-test.example").unwrap();
        let row = PartnerRow::new(partner, "no");
        assert_eq!(row.display_name, "Eksempel test-IdP");
        assert_eq!(row.sso_location.as_deref(), Some("https://idp-test.example/sso"));
        assert_eq!(row.scope_size, 1);
    }

    #[test]
    fn test_partner_detail_human_and_json() {
        let registry = registry();
        let partner = registry.resolve_partner("https://idp-test.example").unwrap();
        let detail = PartnerDetailOutput {
            lang: "en".to_string(),
            partner,
        };

        let human = detail.to_human();
        assert!(human.contains("Example test IdP"));
        assert!(human.contains("3 bytes DER"));
        assert!(human.contains("technical Example Support <support@example.org>"));

        let json = detail.to_json();
        assert_eq!(json["entity_id"], "https://idp-test.example");
        assert_eq!(json["scope"][0], "example.org");
    }

    #[test]
    fn test_show_unknown_partner() {
        let registry = registry();
        let err = execute_show(&registry, "https://unknown", "en", true).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RegistryError>(),
            Some(&RegistryError::UnknownPartner("https://unknown".to_string()))
        );
    }
}
