//! Builder configuration
//!
//! Loaded from TOML or built in code. Every field has a default, so an
//! empty document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::Border;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Border drawn for `border = true`.
    pub default_border: Border,
    /// Start header rows out bold.
    pub header_bold: bool,
    /// Reject malformed `eval` nodes instead of building an empty one.
    pub strict_eval: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_border: Border::Dashed,
            header_bold: true,
            strict_eval: false,
        }
    }
}

impl UiConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn strict() -> Self {
        Self {
            strict_eval: true,
            ..Self::default()
        }
    }
}
