//! Interop configuration file parsing
//!
//! Hosts keep interop settings in the `[interop]` table of their TOML
//! configuration:
//!
//! ```toml
//! [interop]
//! allow_get_type = true        # default: false
//! expose_helper = true         # default: true
//! helper_name = "hostHelper"   # default: "hostHelper"
//! ```
//!
//! Other tables in the file are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::InteropOptions;

/// Default global name the helper object is exposed under
pub const DEFAULT_HELPER_NAME: &str = "hostHelper";

/// Errors that can occur while loading interop configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid interop config: {0}")]
    ValidationError(String),
}

fn default_expose_helper() -> bool {
    true
}

fn default_helper_name() -> String {
    DEFAULT_HELPER_NAME.to_string()
}

/// The `[interop]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InteropConfig {
    /// Allow script code to discover runtime types
    #[serde(default)]
    pub allow_get_type: bool,

    /// Install the helper functions as a script global
    #[serde(default = "default_expose_helper")]
    pub expose_helper: bool,

    /// Global name of the helper object
    #[serde(default = "default_helper_name")]
    pub helper_name: String,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            allow_get_type: false,
            expose_helper: default_expose_helper(),
            helper_name: default_helper_name(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    interop: InteropConfig,
}

impl InteropConfig {
    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse from TOML text; a missing `[interop]` table yields defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.interop.validate()?;
        Ok(file.interop)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_identifier(&self.helper_name) {
            return Err(ConfigError::ValidationError(format!(
                "helper_name '{}' is not a valid script identifier",
                self.helper_name
            )));
        }
        Ok(())
    }

    /// Runtime options using the stock wrap-object policy
    pub fn to_options(&self) -> InteropOptions {
        InteropOptions::new().with_allow_get_type(self.allow_get_type)
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
