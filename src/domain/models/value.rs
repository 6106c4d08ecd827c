use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The declared type of a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Boolean,
    Days,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Days => "days",
        };
        f.write_str(name)
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            "days" => Ok(Self::Days),
            other => Err(format!(
                "unknown value type '{other}' (expected string, integer, boolean or days)"
            )),
        }
    }
}

/// A whole number of days, used for expiry windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Days(pub u32);

impl Days {
    pub const fn count(self) -> u32 {
        self.0
    }

    pub fn to_duration(self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.0))
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

impl FromStr for Days {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('d').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| format!("'{s}' is not a whole number of days"))
    }
}

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Days(Days),
}

impl ConfigValue {
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Integer(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Days(_) => ValueKind::Days,
        }
    }

    /// Coerce a raw YAML scalar to `kind`.
    ///
    /// Strings are accepted for the non-string kinds so that values coming
    /// from quoted YAML or command-line flags resolve the same way.
    pub fn coerce(kind: ValueKind, raw: &serde_yaml::Value) -> Result<Self, String> {
        use serde_yaml::Value;

        match (kind, raw) {
            (ValueKind::String, Value::String(s)) => Ok(Self::String(s.clone())),
            (ValueKind::Integer, Value::Number(n)) => n
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| format!("{n} does not fit a 64-bit integer")),
            (ValueKind::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| format!("'{s}' is not an integer")),
            (ValueKind::Boolean, Value::Bool(b)) => Ok(Self::Boolean(*b)),
            (ValueKind::Boolean, Value::String(s)) => parse_bool(s).map(Self::Boolean),
            (ValueKind::Days, Value::Number(n)) => n
                .as_u64()
                .and_then(|d| u32::try_from(d).ok())
                .map(|d| Self::Days(Days(d)))
                .ok_or_else(|| format!("{n} is not a non-negative day count")),
            (ValueKind::Days, Value::String(s)) => s.parse::<Days>().map(Self::Days),
            (kind, other) => Err(format!("expected {kind}, found {}", describe(other))),
        }
    }

    /// Infer a value from an undeclared YAML scalar.
    pub fn infer(raw: &serde_yaml::Value) -> Result<Self, String> {
        use serde_yaml::Value;

        match raw {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| format!("{n} is not an integer")),
            other => Err(format!("expected a scalar, found {}", describe(other))),
        }
    }

    /// Parse a command-line string as `kind`.
    pub fn parse_as(kind: ValueKind, input: &str) -> Result<Self, String> {
        Self::coerce(kind, &serde_yaml::Value::String(input.to_string()))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Days(d) => write!(f, "{d}"),
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("'{s}' is not a boolean")),
    }
}

const fn describe(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Types that can be read out of a [`ConfigValue`].
pub trait FromConfigValue: Sized {
    /// The kind a stored value must have to convert into `Self`.
    const KIND: ValueKind;

    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

impl FromConfigValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromConfigValue for u64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Integer(i) => Self::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromConfigValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromConfigValue for Days {
    const KIND: ValueKind = ValueKind::Days;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Days(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromConfigValue for chrono::Duration {
    const KIND: ValueKind = ValueKind::Days;

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        Days::from_config_value(value).map(Days::to_duration)
    }
}
