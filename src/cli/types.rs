//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};

use crate::domain::models::ValueKind;

#[derive(Parser, Debug)]
#[command(name = "fedconf")]
#[command(about = "Typed configuration and federation partner registry", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings document (overrides the configured settings_path)
    #[arg(long, global = true, env = "FEDCONF_SETTINGS")]
    pub settings: Option<String>,

    /// Federation metadata document (overrides the configured metadata_path)
    #[arg(long, global = true, env = "FEDCONF_METADATA")]
    pub metadata: Option<String>,

    /// Skip the built-in FileSender schema
    #[arg(long, global = true)]
    pub no_builtin_schema: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load both documents and report what was registered
    Check,

    /// Resolve a single configuration entry
    Get(GetArgs),

    /// List all configuration entries
    List,

    /// List federation partners
    Partners {
        /// Language for display names
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// Show a single federation partner
    Partner {
        /// Entity identifier of the partner
        entity_id: String,

        /// Language for localized fields
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// Find partners whose scope admits a domain or scoped principal
    Scope {
        /// Domain (example.org) or principal (user@example.org)
        subject: String,
    },
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Entry key
    pub key: String,

    /// Expected type: string, integer, boolean or days
    #[arg(short = 't', long = "type")]
    pub kind: Option<ValueKind>,

    /// Value to use when the registry has none
    #[arg(short, long)]
    pub default: Option<String>,
}
