// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structure loaded from `commitlint.toml`.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::plugins::PatternPluginConfig;
use crate::rules::RuleConfig;

use super::default::default_rules;

/// The main configuration structure.
///
/// Loaded once at startup and passed to the linter by value; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Configured rules, in declaration order.
    pub rules: Vec<RuleConfig>,

    /// Pattern rules declared in the file.
    pub plugins: Vec<PatternPluginConfig>,

    /// Whether merge, revert and fixup headers are skipped.
    pub default_ignores: bool,

    /// Extra header patterns to skip.
    pub ignores: Vec<String>,

    /// Comment prefix stripped from commit-message files.
    pub comment_char: Option<char>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            plugins: Vec::new(),
            default_ignores: true,
            ignores: Vec::new(),
            comment_char: Some('#'),
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Look up a configured rule by name.
    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// The file layout before rule tuples are validated.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct RawConfig {
    rules: Option<toml::Table>,
    plugins: Vec<PatternPluginConfig>,
    default_ignores: bool,
    ignores: Vec<String>,
    /// A single character, or `""` to disable comment stripping.
    comment_char: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            rules: None,
            plugins: Vec::new(),
            default_ignores: true,
            ignores: Vec::new(),
            comment_char: "#".to_string(),
        }
    }
}

impl TryFrom<RawConfig> for LintConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let rules = match raw.rules {
            Some(table) => table
                .iter()
                .map(|(name, value)| RuleConfig::from_value(name, value))
                .collect::<Result<Vec<_>, _>>()?,
            None => default_rules(),
        };

        let mut chars = raw.comment_char.chars();
        let comment_char = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(c),
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    key: "comment_char".to_string(),
                    message: format!(
                        "expected a single character or \"\", got {:?}",
                        raw.comment_char
                    ),
                })
            }
        };

        Ok(Self {
            rules,
            plugins: raw.plugins,
            default_ignores: raw.default_ignores,
            ignores: raw.ignores,
            comment_char,
        })
    }
}
