//! Reader configuration

use crate::error::{NoteError, Result};
use crate::infrastructure::Dialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming a config file for the CLI
pub const CONFIG_ENV_VAR: &str = "NOTEXML_CONFIG";

/// Notes a dump strategy makes room for up front
pub const DEFAULT_DUMP_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Dialect to assume when the caller does not name one
    pub dialect: Option<Dialect>,
    /// Output capacity to reserve; defaults depend on the dialect
    pub expected_notes: Option<usize>,
    /// Whether the API dialect reports elements it does not understand
    pub report_unknown_elements: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            dialect: None,
            expected_notes: None,
            report_unknown_elements: true,
        }
    }
}

impl ReaderConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            NoteError::config_caused_by(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        Self::from_toml(&contents).map_err(|e| match e {
            NoteError::TomlDeserialize(inner) => NoteError::config_caused_by(
                format!("Failed to parse config file '{}': {}", path.display(), inner),
                inner,
            ),
            other => other,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the file named by `NOTEXML_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Output capacity to reserve for a given dialect
    pub fn capacity_for(&self, dialect: Dialect) -> usize {
        self.expected_notes.unwrap_or(match dialect {
            Dialect::Api => 0,
            Dialect::Dump => DEFAULT_DUMP_CAPACITY,
        })
    }
}
