use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigKeyError {
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// One of the five keys of the connection configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKey {
    Schema,
    Host,
    Port,
    Service,
    Verbose,
}

impl ConfigKey {
    /// All keys in document order
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::Schema,
        ConfigKey::Host,
        ConfigKey::Port,
        ConfigKey::Service,
        ConfigKey::Verbose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Schema => "schema",
            ConfigKey::Host => "host",
            ConfigKey::Port => "port",
            ConfigKey::Service => "service",
            ConfigKey::Verbose => "verbose",
        }
    }

    /// Label used by the interactive `config generate` prompt
    pub fn prompt_label(&self) -> String {
        match self {
            ConfigKey::Verbose => "  Please enter the VERBOSE for config (true | false): ".to_string(),
            other => format!(
                "  Please enter the {} for config: ",
                other.as_str().to_uppercase()
            ),
        }
    }

    /// Comma separated list of valid keys, for usage messages
    pub fn valid_keys() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Keys are matched exactly; `Schema` is not a valid key.
impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}
