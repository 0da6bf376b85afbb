// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Regex rules declared in configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::commit::ParsedMessage;
use crate::error::{ConfigError, PluginError};
use crate::rules::{Rule, RuleOutcome};

/// A message field a pattern rule can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageField {
    Header,
    Type,
    Scope,
    Subject,
    Body,
    Footer,
}

impl MessageField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageField::Header => "header",
            MessageField::Type => "type",
            MessageField::Scope => "scope",
            MessageField::Subject => "subject",
            MessageField::Body => "body",
            MessageField::Footer => "footer",
        }
    }

    /// Read the field, with a missing field read as the empty string.
    pub fn read<'a>(&self, message: &'a ParsedMessage) -> &'a str {
        let value = match self {
            MessageField::Header => Some(message.header.as_str()),
            MessageField::Type => message.commit_type.as_deref(),
            MessageField::Scope => message.scope.as_deref(),
            MessageField::Subject => message.subject.as_deref(),
            MessageField::Body => message.body.as_deref(),
            MessageField::Footer => message.footer.as_deref(),
        };
        value.unwrap_or("")
    }
}

/// A `[[plugins]]` entry in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternPluginConfig {
    /// Rule name, referenced from `[rules]`.
    pub name: String,
    /// Field the pattern is tested against.
    pub field: MessageField,
    /// Regular expression the field must match.
    pub pattern: String,
    /// Message reported on failure.
    pub message: Option<String>,
}

/// A rule that passes when a message field matches a regular expression.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    field: MessageField,
    regex: Regex,
    message: String,
}

impl PatternRule {
    /// Compile a pattern rule.
    pub fn new(
        name: impl Into<String>,
        field: MessageField,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            name: name.clone(),
            message: e.to_string(),
        })?;

        Ok(Self::from_regex(name, field, regex, message))
    }

    /// Build a pattern rule from an already compiled regex.
    pub fn from_regex(
        name: impl Into<String>,
        field: MessageField,
        regex: Regex,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field,
            regex,
            message: message.into(),
        }
    }

    /// Compile a rule from its configuration entry.
    pub fn from_config(config: &PatternPluginConfig) -> Result<Self, ConfigError> {
        let message = config.message.clone().unwrap_or_else(|| {
            format!("{} must match {}", config.field.as_str(), config.pattern)
        });
        Self::new(&config.name, config.field, &config.pattern, message)
    }

    pub fn field(&self) -> MessageField {
        self.field
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, message: &ParsedMessage) -> Result<RuleOutcome, PluginError> {
        let passed = self.regex.is_match(self.field.read(message));
        Ok(RuleOutcome::new(passed, self.message.clone()))
    }
}
