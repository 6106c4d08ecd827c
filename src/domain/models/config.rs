use serde::{Deserialize, Serialize};

/// Configuration of the fedconf tool itself: where the definition
/// documents live and how to log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Path to the settings document (schema + settings)
    #[serde(default = "default_settings_path")]
    pub settings_path: String,

    /// Path to the federation metadata document
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,

    /// Apply the built-in FileSender schema before the document's own
    /// declarations
    #[serde(default = "default_true")]
    pub builtin_schema: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_settings_path() -> String {
    "config/filesender.yaml".to_string()
}

fn default_metadata_path() -> String {
    "config/saml20-idp-remote.yaml".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            metadata_path: default_metadata_path(),
            builtin_schema: default_true(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
