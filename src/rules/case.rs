// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case styles for the `*-case` rules.

use serde::{Deserialize, Serialize};

/// A letter-case convention a field can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
    LowerCase,
    UpperCase,
    CamelCase,
    KebabCase,
    PascalCase,
    SentenceCase,
    SnakeCase,
    StartCase,
}

impl CaseStyle {
    /// Get the configuration name of the case style.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::LowerCase => "lower-case",
            CaseStyle::UpperCase => "upper-case",
            CaseStyle::CamelCase => "camel-case",
            CaseStyle::KebabCase => "kebab-case",
            CaseStyle::PascalCase => "pascal-case",
            CaseStyle::SentenceCase => "sentence-case",
            CaseStyle::SnakeCase => "snake-case",
            CaseStyle::StartCase => "start-case",
        }
    }

    /// Check whether `text` is written in this case style.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            CaseStyle::LowerCase => text == text.to_lowercase(),
            CaseStyle::UpperCase => text == text.to_uppercase(),
            CaseStyle::CamelCase => {
                starts_with(text, char::is_lowercase) && text.chars().all(char::is_alphanumeric)
            }
            CaseStyle::PascalCase => {
                starts_with(text, char::is_uppercase) && text.chars().all(char::is_alphanumeric)
            }
            CaseStyle::KebabCase => is_delimited_lower(text, '-'),
            CaseStyle::SnakeCase => is_delimited_lower(text, '_'),
            CaseStyle::SentenceCase => is_capitalized(text),
            CaseStyle::StartCase => {
                !text.trim().is_empty() && text.split_whitespace().all(is_capitalized)
            }
        }
    }
}

impl std::str::FromStr for CaseStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(CaseStyle::LowerCase),
            "upper-case" | "uppercase" => Ok(CaseStyle::UpperCase),
            "camel-case" => Ok(CaseStyle::CamelCase),
            "kebab-case" => Ok(CaseStyle::KebabCase),
            "pascal-case" => Ok(CaseStyle::PascalCase),
            "sentence-case" | "sentencecase" => Ok(CaseStyle::SentenceCase),
            "snake-case" => Ok(CaseStyle::SnakeCase),
            "start-case" => Ok(CaseStyle::StartCase),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn starts_with(text: &str, pred: impl Fn(char) -> bool) -> bool {
    text.chars().next().map(pred).unwrap_or(false)
}

/// First letter uppercase, everything after it lowercase.
fn is_capitalized(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest = chars.as_str();
            rest == rest.to_lowercase()
        }
        _ => false,
    }
}

fn is_delimited_lower(text: &str, delimiter: char) -> bool {
    !text.is_empty()
        && !text.starts_with(delimiter)
        && !text.ends_with(delimiter)
        && text
            .chars()
            .all(|c| c == delimiter || c.is_ascii_digit() || c.is_lowercase())
}
