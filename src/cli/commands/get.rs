use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::GetArgs;
use crate::domain::models::{ConfigValue, Days, FromConfigValue, ValueKind, ValueOrigin};
use crate::domain::{RegistryError, RegistryResult};
use crate::infrastructure::logging::SecretScrubber;
use crate::services::ConfigRegistry;

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub value: serde_json::Value,
    /// explicit, default, or fallback (the --default flag)
    pub origin: &'static str,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Resolve `key` as `kind`, using `fallback` when the registry has no value.
pub fn resolve(
    registry: &ConfigRegistry,
    key: &str,
    kind: ValueKind,
    fallback: Option<ConfigValue>,
) -> RegistryResult<ConfigValue> {
    match kind {
        ValueKind::String => typed::<String>(registry, key, fallback, ConfigValue::String),
        ValueKind::Integer => typed::<i64>(registry, key, fallback, ConfigValue::Integer),
        ValueKind::Boolean => typed::<bool>(registry, key, fallback, ConfigValue::Boolean),
        ValueKind::Days => typed::<Days>(registry, key, fallback, ConfigValue::Days),
    }
}

fn typed<T: FromConfigValue>(
    registry: &ConfigRegistry,
    key: &str,
    fallback: Option<ConfigValue>,
    wrap: fn(T) -> ConfigValue,
) -> RegistryResult<ConfigValue> {
    let value = match fallback.as_ref().and_then(T::from_config_value) {
        Some(fallback) => registry.get_or::<T>(key, fallback)?,
        None => registry.get::<T>(key)?,
    };
    Ok(wrap(value))
}

/// Handle the get command
pub fn execute(registry: &ConfigRegistry, args: GetArgs, json: bool) -> Result<()> {
    let kind = args
        .kind
        .or_else(|| registry.entry(&args.key).map(|entry| entry.kind))
        .unwrap_or(ValueKind::String);

    let fallback = args
        .default
        .as_deref()
        .map(|raw| ConfigValue::parse_as(kind, raw))
        .transpose()
        .map_err(|reason| anyhow!("Invalid --default for '{}': {reason}", args.key))?;

    let value = resolve(registry, &args.key, kind, fallback).map_err(|err| match err {
        RegistryError::MissingRequiredKey(_) => {
            anyhow!(err).context(format!("'{}' has no value and no default", args.key))
        }
        other => anyhow!(other),
    })?;

    let origin = match registry.entry(&args.key).and_then(|entry| entry.origin()) {
        Some(ValueOrigin::Explicit) => "explicit",
        Some(ValueOrigin::Default) => "default",
        None => "fallback",
    };

    let scrubber = SecretScrubber::new();
    let shown = if scrubber.is_secret_key(&args.key) {
        serde_json::Value::String(crate::infrastructure::logging::REDACTED.to_string())
    } else {
        match &value {
            ConfigValue::String(s) => serde_json::Value::String(s.clone()),
            ConfigValue::Integer(i) => serde_json::Value::from(*i),
            ConfigValue::Boolean(b) => serde_json::Value::Bool(*b),
            ConfigValue::Days(d) => serde_json::Value::from(d.count()),
        }
    };

    output(
        &GetOutput {
            key: args.key,
            kind: value.kind(),
            value: shown,
            origin,
        },
        json,
    );
    Ok(())
}
