// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule configuration tuples.
//!
//! A rule is configured as `[severity, applicability, param]`, for example
//! `header-max-length = [2, "always", 100]`. The trailing elements are
//! optional: `[0]` turns a rule off, `[1, "always"]` enables a rule that
//! takes no parameter.

use crate::error::ConfigError;
use serde::Serialize;
use std::fmt;

use super::report::Level;

/// How strictly a rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Rule is skipped entirely.
    Off = 0,
    /// Violations are reported but do not invalidate the message.
    Warning = 1,
    /// Violations invalidate the message.
    Error = 2,
}

impl Severity {
    /// The report level for this severity, `None` when the rule is off.
    pub fn level(&self) -> Option<Level> {
        match self {
            Severity::Off => None,
            Severity::Warning => Some(Level::Warning),
            Severity::Error => Some(Level::Error),
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, i64> {
        match value {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(other),
        }
    }
}

/// Whether a rule's condition must or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }

    /// Apply to a rule's base condition.
    pub fn apply(&self, condition: bool) -> bool {
        match self {
            Applicability::Always => condition,
            Applicability::Never => !condition,
        }
    }
}

impl std::str::FromStr for Applicability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Applicability::Always),
            "never" => Ok(Applicability::Never),
            _ => Err(()),
        }
    }
}

/// The rule-specific third element of a rule tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RuleParam {
    /// A literal string or single case mode.
    Text(String),
    /// A length limit.
    Number(usize),
    /// An enum list or several case modes.
    List(Vec<String>),
}

impl RuleParam {
    /// View the parameter as a list of strings. A single string is a
    /// one-element list.
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            RuleParam::Text(s) => Some(vec![s.as_str()]),
            RuleParam::List(items) => Some(items.iter().map(String::as_str).collect()),
            RuleParam::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<usize> {
        match self {
            RuleParam::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleParam::Text(s) => Some(s),
            _ => None,
        }
    }

    fn from_value(name: &str, value: &toml::Value) -> Result<Self, ConfigError> {
        match value {
            toml::Value::String(s) => Ok(RuleParam::Text(s.clone())),
            toml::Value::Integer(n) => usize::try_from(*n)
                .map(RuleParam::Number)
                .map_err(|_| invalid(name, format!("length must not be negative, got {}", n))),
            toml::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        invalid(name, format!("list entries must be strings, got {}", item))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RuleParam::List),
            other => Err(invalid(
                name,
                format!("unsupported parameter type '{}'", other.type_str()),
            )),
        }
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::Text(s) => write!(f, "{:?}", s),
            RuleParam::Number(n) => write!(f, "{}", n),
            RuleParam::List(items) => {
                let quoted: Vec<String> = items.iter().map(|s| format!("{:?}", s)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

/// A configured rule: name, severity, applicability and parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleConfig {
    pub name: String,
    pub severity: Severity,
    pub applicability: Applicability,
    pub param: Option<RuleParam>,
}

impl RuleConfig {
    /// Create a rule configuration without a parameter.
    pub fn new(name: impl Into<String>, severity: Severity, applicability: Applicability) -> Self {
        Self {
            name: name.into(),
            severity,
            applicability,
            param: None,
        }
    }

    /// Set the parameter.
    pub fn with_param(mut self, param: RuleParam) -> Self {
        self.param = Some(param);
        self
    }

    /// Parse a `[severity, applicability, param]` tuple.
    pub fn from_value(name: &str, value: &toml::Value) -> Result<Self, ConfigError> {
        let items = value.as_array().ok_or_else(|| {
            invalid(
                name,
                "expected an array like [severity, \"always\"|\"never\", param]",
            )
        })?;

        if items.is_empty() || items.len() > 3 {
            return Err(invalid(
                name,
                format!("expected 1 to 3 elements, got {}", items.len()),
            ));
        }

        let severity = items[0]
            .as_integer()
            .ok_or_else(|| invalid(name, "severity must be an integer"))
            .and_then(|level| {
                Severity::try_from(level)
                    .map_err(|l| invalid(name, format!("severity must be 0, 1 or 2, got {}", l)))
            })?;

        let applicability = match items.get(1) {
            Some(value) => value
                .as_str()
                .and_then(|s| s.parse::<Applicability>().ok())
                .ok_or_else(|| {
                    invalid(
                        name,
                        format!("applicability must be \"always\" or \"never\", got {}", value),
                    )
                })?,
            None => Applicability::Always,
        };

        let param = items
            .get(2)
            .map(|value| RuleParam::from_value(name, value))
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            severity,
            applicability,
            param,
        })
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {:?}",
            self.severity as u8,
            self.applicability.as_str()
        )?;
        if let Some(ref param) = self.param {
            write!(f, ", {}", param)?;
        }
        write!(f, "]")
    }
}

fn invalid(name: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: format!("rules.{}", name),
        message: message.into(),
    }
}
