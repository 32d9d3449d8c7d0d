// File: src/config.rs
// Externally supplied configuration. The host application owns persistence;
// this crate only defines the shape and the deserializers.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A caller-supplied auto-link rule: `pattern` is a capturing regular
/// expression, `target` a template over its groups (`$1`, `${name}`).
///
/// Matched text becomes a `Link` token whose value is the expanded target
/// while its raw text stays untouched, so lines still round-trip:
/// pattern `(EXAMPLE-\d+)` with target `https://x/$1` turns the substring
/// `EXAMPLE-7` into a link to `https://x/EXAMPLE-7`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AutoLinkRule {
    pub pattern: String,
    pub target: String,
}

/// Parser-relevant settings as stored by the host application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub auto_link_rules: Vec<AutoLinkRule>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings JSON")
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse settings TOML")
    }
}
