//! Render configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, TokenStyle, TreeTokens};

/// How a dependency tree is drawn.
///
/// ```json
/// { "style": "extended" }
/// ```
///
/// A `tokens` object takes precedence over `style`:
///
/// ```json
/// { "tokens": { "node": "|-- ", "last_node": "`-- ", "fill": "|   ", "last_fill": "    " } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Built-in token style.
    #[serde(default)]
    pub style: TokenStyle,

    /// Custom tokens overriding `style`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TreeTokens>,
}

impl RenderConfig {
    /// Creates a configuration for a built-in style.
    pub fn new(style: TokenStyle) -> Self {
        Self {
            style,
            tokens: None,
        }
    }

    /// Creates a configuration with custom tokens.
    pub fn custom(tokens: TreeTokens) -> Self {
        Self {
            style: TokenStyle::default(),
            tokens: Some(tokens),
        }
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::from_json(&content)?;
        debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the tokens to draw with.
    pub fn tokens(&self) -> TreeTokens {
        self.tokens.clone().unwrap_or_else(|| self.style.tokens())
    }

    /// Names the token set in use: the style name, or `custom`.
    pub fn style_name(&self) -> &'static str {
        if self.tokens.is_some() {
            "custom"
        } else {
            self.style.as_str()
        }
    }
}
