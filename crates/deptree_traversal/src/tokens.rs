//! Glyph sets used to draw tree diagrams.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The four glyph strings drawn in front of each label.
///
/// `node` and `last_node` connect a node to its parent; `fill` and
/// `last_fill` continue (or blank out) an ancestor's vertical bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeTokens {
    /// Connector for a node that has later siblings.
    pub node: Cow<'static, str>,
    /// Connector for the last child of its parent.
    pub last_node: Cow<'static, str>,
    /// Fill below an ancestor that has later siblings.
    pub fill: Cow<'static, str>,
    /// Fill below an ancestor that is the last child of its parent.
    pub last_fill: Cow<'static, str>,
}

impl TreeTokens {
    /// Whitespace only.
    pub const PLAIN: Self = Self::from_static("   ", "   ", "   ", "   ");

    /// `+- `, `\- `, `|  `.
    pub const ASCII: Self = Self::from_static("+- ", "\\- ", "|  ", "   ");

    /// Unicode box drawing.
    pub const EXTENDED: Self = Self::from_static("\u{251C}\u{2500} ", "\u{2514}\u{2500} ", "\u{2502}  ", "   ");

    /// Creates a token set from borrowed static strings.
    pub const fn from_static(
        node: &'static str,
        last_node: &'static str,
        fill: &'static str,
        last_fill: &'static str,
    ) -> Self {
        Self {
            node: Cow::Borrowed(node),
            last_node: Cow::Borrowed(last_node),
            fill: Cow::Borrowed(fill),
            last_fill: Cow::Borrowed(last_fill),
        }
    }

    /// Creates a custom token set.
    pub fn new(
        node: impl Into<String>,
        last_node: impl Into<String>,
        fill: impl Into<String>,
        last_fill: impl Into<String>,
    ) -> Self {
        Self {
            node: Cow::Owned(node.into()),
            last_node: Cow::Owned(last_node.into()),
            fill: Cow::Owned(fill.into()),
            last_fill: Cow::Owned(last_fill.into()),
        }
    }

    #[inline]
    pub(crate) fn connector(&self, last: bool) -> &str {
        if last { &*self.last_node } else { &*self.node }
    }

    #[inline]
    pub(crate) fn fill(&self, last: bool) -> &str {
        if last { &*self.last_fill } else { &*self.fill }
    }
}

impl Default for TreeTokens {
    fn default() -> Self {
        Self::ASCII
    }
}

/// Built-in token sets, selectable by configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TokenStyle {
    /// [`TreeTokens::PLAIN`].
    Plain,
    /// [`TreeTokens::ASCII`].
    #[default]
    Ascii,
    /// [`TreeTokens::EXTENDED`].
    Extended,
}

impl TokenStyle {
    /// Returns the token set for this style.
    pub const fn tokens(self) -> TreeTokens {
        match self {
            Self::Plain => TreeTokens::PLAIN,
            Self::Ascii => TreeTokens::ASCII,
            Self::Extended => TreeTokens::EXTENDED,
        }
    }

    /// Configuration name of this style.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Ascii => "ascii",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for TokenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenStyle {
    type Err = ConfigError;

    /// Parses a style name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "ascii" => Ok(Self::Ascii),
            "extended" => Ok(Self::Extended),
            _ => Err(ConfigError::UnknownStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for TokenStyle {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
