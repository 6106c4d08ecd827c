//! Errors raised while loading or querying the registry.

use thiserror::Error;

use super::models::ValueKind;

/// Registry load and lookup errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Malformed entry '{key}': {reason}")]
    MalformedEntry { key: String, reason: String },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Missing required key: {0}")]
    MissingRequiredKey(String),

    #[error("Unknown federation partner: {0}")]
    UnknownPartner(String),

    #[error("Type mismatch for '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Invalid definition source {source_name}: {reason}")]
    InvalidSource { source_name: String, reason: String },
}

impl RegistryError {
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_source(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidSource {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable machine-readable name used in JSON error output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedEntry { .. } => "malformed_entry",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::MissingRequiredKey(_) => "missing_required_key",
            Self::UnknownPartner(_) => "unknown_partner",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidSource { .. } => "invalid_source",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
