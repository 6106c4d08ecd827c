use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::models::ConfigEntry;

/// Placeholder shown instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

static SECRET_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(password|passwd|secret|token|api_?key|private_?key)")
        .expect("secret key pattern is valid")
});

static INLINE_SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(["']?[a-z_]*(?:password|passwd|secret|token|api_?key)["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#,
    )
    .expect("inline secret pattern is valid")
});

/// Masks configuration values whose keys look like credentials.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Whether values stored under `key` must not be shown.
    pub fn is_secret_key(&self, key: &str) -> bool {
        SECRET_KEY_PATTERN.is_match(key)
    }

    /// Display form of an entry's effective value, masked when secret.
    pub fn display_value(&self, entry: &ConfigEntry) -> Option<String> {
        entry.effective().map(|value| {
            if self.is_secret_key(&entry.key) {
                REDACTED.to_string()
            } else {
                value.to_string()
            }
        })
    }

    /// Scrub `key: value` / `key=value` credential pairs from free text.
    pub fn scrub_message(&self, message: &str) -> String {
        INLINE_SECRET_PATTERN
            .replace_all(message, format!("${{1}}{REDACTED}"))
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ConfigValue, ValueKind};

    fn entry(key: &str, value: &str) -> ConfigEntry {
        ConfigEntry {
            key: key.to_string(),
            kind: ValueKind::String,
            value: Some(ConfigValue::String(value.to_string())),
            default: None,
            required: true,
        }
    }

    #[test]
    fn test_secret_keys() {
        let scrubber = SecretScrubber::new();
        assert!(scrubber.is_secret_key("db_password"));
        assert!(scrubber.is_secret_key("DB_PASSWORD"));
        assert!(scrubber.is_secret_key("upload_api_key"));
        assert!(!scrubber.is_secret_key("db_username"));
        assert!(!scrubber.is_secret_key("site_url"));
    }

    #[test]
    fn test_display_value_masks_secrets() {
        let scrubber = SecretScrubber::new();
        assert_eq!(
            scrubber.display_value(&entry("db_password", "FILESENDERPASSWORD")),
            Some(REDACTED.to_string())
        );
        assert_eq!(
            scrubber.display_value(&entry("db_host", "db.example.org")),
            Some("db.example.org".to_string())
        );
    }

    #[test]
    fn test_scrub_password_field() {
        let scrubber = SecretScrubber::new();
        let scrubbed = scrubber.scrub_message(r#"{"db_password": "super_secret_password"}"#);
        assert!(!scrubbed.contains("super_secret_password"));
        assert!(scrubbed.contains(REDACTED));

        let scrubbed = scrubber.scrub_message("connect with password=hunter2 now");
        assert_eq!(scrubbed, "connect with password=[REDACTED] now");
    }

    #[test]
    fn test_scrub_leaves_plain_text() {
        let scrubber = SecretScrubber::new();
        let message = "Missing required key: db_password";
        assert_eq!(scrubber.scrub_message(message), message);
    }
}
