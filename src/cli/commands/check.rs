use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::ConfigRegistry;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub settings_path: String,
    pub metadata_path: String,
    pub entries: usize,
    pub explicit: usize,
    pub defaulted: usize,
    pub unset: usize,
    pub partners: usize,
}

impl CheckOutput {
    pub fn from_registry(
        registry: &ConfigRegistry,
        settings_path: &str,
        metadata_path: &str,
    ) -> Self {
        let (mut explicit, mut defaulted, mut unset) = (0, 0, 0);
        for entry in registry.entries() {
            if entry.value.is_some() {
                explicit += 1;
            } else if entry.default.is_some() {
                defaulted += 1;
            } else {
                unset += 1;
            }
        }

        Self {
            settings_path: settings_path.to_string(),
            metadata_path: metadata_path.to_string(),
            entries: explicit + defaulted + unset,
            explicit,
            defaulted,
            unset,
            partners: registry.partner_count(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        format!(
            "{} {}\n{} {}\n\nEntries:   {} ({} set, {} from defaults, {} unset)\nPartners:  {}",
            console::style("✓").green(),
            self.settings_path,
            console::style("✓").green(),
            self.metadata_path,
            self.entries,
            self.explicit,
            self.defaulted,
            self.unset,
            self.partners,
        )
    }
}

/// Handle the check command. Loading already happened; report what was
/// registered.
pub fn execute(
    registry: &ConfigRegistry,
    settings_path: &str,
    metadata_path: &str,
    json: bool,
) {
    output(
        &CheckOutput::from_registry(registry, settings_path, metadata_path),
        json,
    );
}
