use serde::Serialize;

use crate::cli::display::table::{list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{ValueKind, ValueOrigin};
use crate::infrastructure::logging::SecretScrubber;
use crate::services::ConfigRegistry;

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub value: Option<String>,
    pub origin: Option<ValueOrigin>,
    pub required: bool,
}

#[derive(Debug, Serialize)]
pub struct EntryListOutput {
    pub entries: Vec<EntryRow>,
}

impl EntryListOutput {
    pub fn from_registry(registry: &ConfigRegistry) -> Self {
        let scrubber = SecretScrubber::new();
        let entries = registry
            .entries()
            .map(|entry| EntryRow {
                key: entry.key.clone(),
                kind: entry.kind,
                value: scrubber.display_value(entry),
                origin: entry.origin(),
                required: entry.required,
            })
            .collect();
        Self { entries }
    }
}

impl CommandOutput for EntryListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "type", "value", "origin"]);
        for row in &self.entries {
            let origin = match row.origin {
                Some(ValueOrigin::Explicit) => "set",
                Some(ValueOrigin::Default) => "default",
                None => "-",
            };
            table.add_row(vec![
                row.key.clone(),
                row.kind.to_string(),
                row.value
                    .as_deref()
                    .map_or_else(|| "-".to_string(), |v| truncate(v, 60)),
                origin.to_string(),
            ]);
        }
        render_list("entry", "entries", &table, self.entries.len())
    }
}

/// Handle the list command
pub fn execute(registry: &ConfigRegistry, json: bool) {
    output(&EntryListOutput::from_registry(registry), json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::REDACTED;
    use crate::infrastructure::source::RegistrySource;

    #[test]
    fn test_list_masks_secrets() {
        let settings = "settings:\n  db_password: FILESENDERPASSWORD\n  db_user: filesender\n";
        let registry =
            ConfigRegistry::load(RegistrySource::from_yaml(settings, "").unwrap()).unwrap();
        let listing = EntryListOutput::from_registry(&registry);

        let password = listing
            .entries
            .iter()
            .find(|row| row.key == "db_password")
            .unwrap();
        assert_eq!(password.value.as_deref(), Some(REDACTED));
        assert!(!listing.to_human().contains("FILESENDERPASSWORD"));
        assert!(listing.to_human().contains("filesender"));
    }
}
