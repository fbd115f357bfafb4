//! Loading render configuration from TOML
//!
//! ```toml
//! svg = false
//! preserve_case = false
//!
//! [html]
//! self_closing_void = true
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::HtmlConfig;
use crate::RenderConfig;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// TOML structure for deserializing a render configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    svg: Option<bool>,
    preserve_case: Option<bool>,
    html: Option<TomlHtml>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlHtml {
    self_closing_void: Option<bool>,
}

impl RenderConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = RenderConfig::default();

        let mut html = HtmlConfig::default();
        if let Some(self_closing) = parsed.html.and_then(|h| h.self_closing_void) {
            html = html.with_self_closing_void(self_closing);
        }

        Ok(RenderConfig {
            svg: parsed.svg.unwrap_or(defaults.svg),
            preserve_case: parsed.preserve_case.unwrap_or(defaults.preserve_case),
            html,
        })
    }
}
