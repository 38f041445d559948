//! Tree builder options.

use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Options controlling which markdown syntax the tree builder recognizes.
///
/// Options are read fresh on every call; nothing is cached between parses.
///
/// # Example
///
/// ```rust
/// use marktree_parser::Options;
///
/// let options = Options::from_json(r#"{ "explicitLineBreaks": true }"#).unwrap();
///
/// assert!(options.extended_syntax);
/// assert!(options.explicit_line_breaks);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Enables GFM strikethrough, tables, autolink literals and task lists.
    #[serde(default = "default_extended_syntax")]
    pub extended_syntax: bool,

    /// Turns single newlines inside paragraphs into `br` nodes.
    #[serde(default)]
    pub explicit_line_breaks: bool,
}

fn default_extended_syntax() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            extended_syntax: default_extended_syntax(),
            explicit_line_breaks: false,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether extended (GFM) syntax is recognized.
    pub fn with_extended_syntax(mut self, enabled: bool) -> Self {
        self.extended_syntax = enabled;
        self
    }

    /// Sets whether single newlines become `br` nodes.
    pub fn with_explicit_line_breaks(mut self, enabled: bool) -> Self {
        self.explicit_line_breaks = enabled;
        self
    }

    /// Reads options from a JSON object.
    ///
    /// Missing keys take their default; unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }
}
