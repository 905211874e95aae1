/// TOML settings for the ambient pieces around the engine

use crate::error::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toml::{Table, Value};

const TOP_LEVEL_KEYS: &[&str] = &["logging"];
const LOGGING_KEYS: &[&str] = &["level", "format", "file_line"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderSettings {
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    pub file_line: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_line: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl ExpanderSettings {
    /// Parses settings, rejecting every key it does not know in one error.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: Table = content.parse()?;

        let unknown = unknown_keys(&table);
        if !unknown.is_empty() {
            return Err(ConfigurationError::UnknownOptions(unknown).into());
        }

        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn unknown_keys(table: &Table) -> Vec<String> {
    let mut unknown = Vec::new();

    for (key, value) in table {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            unknown.push(key.clone());
            continue;
        }
        if let Value::Table(logging) = value {
            unknown.extend(
                logging
                    .keys()
                    .filter(|nested| !LOGGING_KEYS.contains(&nested.as_str()))
                    .map(|nested| format!("{}.{}", key, nested)),
            );
        }
    }

    unknown
}
