use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::management::validator::MAX_QUERY_LENGTH;

pub const ENV_MAX_QUERY_LENGTH: &str = "SQL2CYPHER_MAX_QUERY_LENGTH";
pub const ENV_HISTORY_PAGE_SIZE: &str = "SQL2CYPHER_HISTORY_PAGE_SIZE";
pub const ENV_LOG: &str = "SQL2CYPHER_LOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub max_query_length: usize,
    pub history_page_size: usize,
    pub log_level: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            max_query_length: MAX_QUERY_LENGTH,
            history_page_size: 50,
            log_level: "info".to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Defaults with the process environment applied on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_QUERY_LENGTH) {
            self.max_query_length = parse_number(ENV_MAX_QUERY_LENGTH, value)?;
        }
        if let Some(value) = lookup(ENV_HISTORY_PAGE_SIZE) {
            self.history_page_size = parse_number(ENV_HISTORY_PAGE_SIZE, value)?;
        }
        if let Some(value) = lookup(ENV_LOG) {
            self.log_level = value;
        }
        Ok(self)
    }
}

fn parse_number(key: &str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.max_query_length, 5000);
        assert_eq!(config.history_page_size, 50);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_query_length = 100").unwrap();

        let config = TranslatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_query_length, 100);
        assert_eq!(config.history_page_size, 50);
    }

    #[test]
    fn malformed_file() {
        let err = TranslatorConfig::from_toml("max_query_length = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file() {
        let err = TranslatorConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_MAX_QUERY_LENGTH, "250"),
            (ENV_LOG, "debug"),
        ]);
        let config = TranslatorConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.max_query_length, 250);
        assert_eq!(config.history_page_size, 50);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn invalid_override() {
        let err = TranslatorConfig::default()
            .with_overrides(|key| (key == ENV_HISTORY_PAGE_SIZE).then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
