//! Command-line interface
//!
//! Every command loads the registry once from the configured documents and
//! then only reads from it.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::models::AppConfig;
use crate::domain::RegistryError;
use crate::infrastructure::logging::SecretScrubber;
use crate::infrastructure::source::RegistrySource;
use crate::services::{ConfigRegistry, Schema};

pub use types::{Cli, Commands, GetArgs};

/// Apply command-line overrides on top of the loaded tool configuration.
pub fn apply_overrides(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(settings) = &cli.settings {
        config.settings_path.clone_from(settings);
    }
    if let Some(metadata) = &cli.metadata {
        config.metadata_path.clone_from(metadata);
    }
    if cli.no_builtin_schema {
        config.builtin_schema = false;
    }
    config
}

/// Load the registry described by `config`.
pub fn load_registry(config: &AppConfig) -> Result<Arc<ConfigRegistry>> {
    debug!(
        settings = %config.settings_path,
        metadata = %config.metadata_path,
        builtin_schema = config.builtin_schema,
        "loading registry"
    );

    let mut source = RegistrySource::from_files(&config.settings_path, &config.metadata_path)?;
    if config.builtin_schema {
        source = source.with_base_schema(Schema::filesender());
    }

    let registry = ConfigRegistry::load(source).with_context(|| {
        format!(
            "Failed to load {} and {}",
            config.settings_path, config.metadata_path
        )
    })?;
    Ok(Arc::new(registry))
}

/// Run a parsed command against the configured documents.
pub fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let config = apply_overrides(&cli, config);
    let registry = load_registry(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Check => {
            commands::check::execute(&registry, &config.settings_path, &config.metadata_path, json);
            Ok(())
        }
        Commands::Get(args) => commands::get::execute(&registry, args, json),
        Commands::List => {
            commands::list::execute(&registry, json);
            Ok(())
        }
        Commands::Partners { lang } => {
            commands::partners::execute_list(&registry, &lang, json);
            Ok(())
        }
        Commands::Partner { entity_id, lang } => {
            commands::partners::execute_show(&registry, &entity_id, &lang, json)
        }
        Commands::Scope { subject } => {
            commands::scope::execute(&registry, &subject, json);
            Ok(())
        }
    }
}

/// Stable error code for `err`, when it carries a registry error.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RegistryError>())
        .map_or("error", RegistryError::code)
}

/// Report `err` on stderr (or stdout as JSON) with secrets scrubbed.
pub fn handle_error(err: &anyhow::Error, json: bool) {
    let scrubber = SecretScrubber::new();
    let message = scrubber.scrub_message(&format!("{err:#}"));

    if json {
        let body = serde_json::json!({
            "error": error_code(err),
            "message": message,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {}", console::style("Error:").red().bold(), message);
    }
}
