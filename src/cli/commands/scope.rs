use serde::Serialize;

use crate::cli::display::table::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::services::ConfigRegistry;

#[derive(Debug, Serialize)]
pub struct ScopeMatch {
    pub entity_id: String,
    pub display_name: String,
    /// Scope entries that admitted the subject
    pub matched: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScopeOutput {
    pub subject: String,
    pub partners: Vec<ScopeMatch>,
}

impl ScopeOutput {
    pub fn from_registry(registry: &ConfigRegistry, subject: &str) -> Self {
        let domain = subject.rsplit_once('@').map_or(subject, |(_, domain)| domain);
        let partners = registry
            .partners_for_scope(subject)
            .map(|partner| ScopeMatch {
                entity_id: partner.entity_id.clone(),
                display_name: partner.display_name("en").to_string(),
                matched: partner.matching_scope(domain).map(String::from).collect(),
            })
            .collect();

        Self {
            subject: subject.to_string(),
            partners,
        }
    }
}

impl CommandOutput for ScopeOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["entity id", "name", "matched scope"]);
        for row in &self.partners {
            table.add_row(vec![
                row.entity_id.clone(),
                row.display_name.clone(),
                row.matched.join(", "),
            ]);
        }
        render_list("partner", "partners", &table, self.partners.len())
    }
}

/// Handle the scope command
pub fn execute(registry: &ConfigRegistry, subject: &str, json: bool) {
    output(&ScopeOutput::from_registry(registry, subject), json);
}
