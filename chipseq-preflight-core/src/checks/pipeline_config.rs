//! Snakemake pipeline configuration (`config.yaml`)
//!
//! Duplicate keys are accepted and the last occurrence wins, at every nesting
//! level. The key keeps the position of its first occurrence.

use std::{
    fmt,
    path::Path,
};

use serde::de::{
    value::EnumAccessDeserializer,
    Deserialize,
    Deserializer,
    EnumAccess,
    MapAccess,
    SeqAccess,
    Visitor,
};
use serde_yaml::{
    value::TaggedValue,
    Mapping,
    Value,
};
use thiserror::Error;
use tracing::debug;

use crate::report::{
    ConfigEntry,
    KeyCheck,
};

/// Reason the configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("{0}")]
    Read(std::io::Error),
    /// YAML syntax error
    #[error("{0}")]
    Syntax(serde_yaml::Error),
    /// Top-level document is not a key-value mapping
    #[error("expected a key-value mapping at the top level, found {0}")]
    NotAMapping(&'static str),
}

/// YAML value whose mappings keep the last of duplicate keys
struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastWinsVisitor).map(LastWins)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        LastWins::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(LastWins(item)) = seq.next_element::<LastWins>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) =
            map.next_entry::<LastWins, LastWins>()?
        {
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        TaggedValue::deserialize(EnumAccessDeserializer::new(data))
            .map(|tagged| Value::Tagged(Box::new(tagged)))
    }
}

/// Flat key-value pipeline configuration, document order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    entries: Mapping,
}

impl PipelineConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        debug!(path = %path.display(), "loading pipeline configuration");
        let content = std::fs::read_to_string(path).map_err(ConfigLoadError::Read)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration text; an empty or `null` document is an empty mapping
    pub fn from_yaml(content: &str) -> Result<Self, ConfigLoadError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let LastWins(value) = serde_yaml::from_str(content).map_err(ConfigLoadError::Syntax)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(entries) => Ok(Self { entries }),
            other => Err(ConfigLoadError::NotAMapping(kind_name(&other))),
        }
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Entries in document order, rendered for display
    pub fn entries(&self) -> Vec<ConfigEntry> {
        self.entries
            .iter()
            .map(|(key, value)| ConfigEntry {
                key:   display_key(key),
                value: display_value(value),
            })
            .collect()
    }

    /// Check every required key; never stops at the first missing one
    pub fn check_required_keys(&self, required: &[String]) -> Vec<KeyCheck> {
        required
            .iter()
            .map(|key| KeyCheck {
                key:   key.clone(),
                value: self.get(key).map(display_value),
            })
            .collect()
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => display_value(other),
    }
}

/// Render a YAML value on one line
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(", "))
        },
        Value::Mapping(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", display_key(k), display_value(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        },
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
    }
}
