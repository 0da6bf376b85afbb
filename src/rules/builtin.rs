// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules and the trait custom rules implement.

use crate::commit::ParsedMessage;
use crate::error::{ConfigError, PluginError};

use super::case::CaseStyle;
use super::definition::{Applicability, RuleParam};

/// Outcome of a custom rule's predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the base condition holds.
    pub passed: bool,
    /// Message reported when the rule fails.
    pub message: String,
}

impl RuleOutcome {
    pub fn new(passed: bool, message: impl Into<String>) -> Self {
        Self {
            passed,
            message: message.into(),
        }
    }
}

/// Trait for custom (plugin) rules.
///
/// Implementations must be pure: the same message always yields the same
/// outcome. An `Err` fails this rule only; other rules keep running.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> &str;

    /// Evaluate the rule's base condition against a parsed message.
    fn evaluate(&self, message: &ParsedMessage) -> Result<RuleOutcome, PluginError>;
}

/// Rules that ship with the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    TypeEnum,
    TypeCase,
    TypeEmpty,
    ScopeEnum,
    ScopeCase,
    ScopeEmpty,
    SubjectCase,
    SubjectEmpty,
    SubjectFullStop,
    SubjectMaxLength,
    HeaderMaxLength,
    HeaderMinLength,
    BodyLeadingBlank,
    BodyMaxLineLength,
    FooterLeadingBlank,
    FooterMaxLineLength,
}

impl BuiltinRule {
    /// Get the rule name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinRule::TypeEnum => "type-enum",
            BuiltinRule::TypeCase => "type-case",
            BuiltinRule::TypeEmpty => "type-empty",
            BuiltinRule::ScopeEnum => "scope-enum",
            BuiltinRule::ScopeCase => "scope-case",
            BuiltinRule::ScopeEmpty => "scope-empty",
            BuiltinRule::SubjectCase => "subject-case",
            BuiltinRule::SubjectEmpty => "subject-empty",
            BuiltinRule::SubjectFullStop => "subject-full-stop",
            BuiltinRule::SubjectMaxLength => "subject-max-length",
            BuiltinRule::HeaderMaxLength => "header-max-length",
            BuiltinRule::HeaderMinLength => "header-min-length",
            BuiltinRule::BodyLeadingBlank => "body-leading-blank",
            BuiltinRule::BodyMaxLineLength => "body-max-line-length",
            BuiltinRule::FooterLeadingBlank => "footer-leading-blank",
            BuiltinRule::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    /// Get all built-in rules.
    pub fn all() -> &'static [BuiltinRule] {
        &[
            BuiltinRule::TypeEnum,
            BuiltinRule::TypeCase,
            BuiltinRule::TypeEmpty,
            BuiltinRule::ScopeEnum,
            BuiltinRule::ScopeCase,
            BuiltinRule::ScopeEmpty,
            BuiltinRule::SubjectCase,
            BuiltinRule::SubjectEmpty,
            BuiltinRule::SubjectFullStop,
            BuiltinRule::SubjectMaxLength,
            BuiltinRule::HeaderMaxLength,
            BuiltinRule::HeaderMinLength,
            BuiltinRule::BodyLeadingBlank,
            BuiltinRule::BodyMaxLineLength,
            BuiltinRule::FooterLeadingBlank,
            BuiltinRule::FooterMaxLineLength,
        ]
    }

    /// Look up a built-in rule by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|rule| rule.name() == name)
    }

    /// Check that a configured parameter has the shape this rule needs.
    pub fn validate_param(&self, param: Option<&RuleParam>) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: format!("rules.{}", self.name()),
            message,
        };

        match self {
            BuiltinRule::TypeEnum | BuiltinRule::ScopeEnum => match param {
                Some(RuleParam::List(_)) => Ok(()),
                _ => Err(invalid("expected a list of allowed values".to_string())),
            },
            BuiltinRule::TypeCase | BuiltinRule::ScopeCase | BuiltinRule::SubjectCase => {
                let names = param
                    .and_then(RuleParam::as_list)
                    .ok_or_else(|| invalid("expected a case name or list of case names".to_string()))?;
                match names.iter().find(|n| n.parse::<CaseStyle>().is_err()) {
                    Some(unknown) => Err(invalid(format!("unknown case '{}'", unknown))),
                    None => Ok(()),
                }
            }
            BuiltinRule::SubjectFullStop => match param {
                None | Some(RuleParam::Text(_)) => Ok(()),
                Some(_) => Err(invalid("expected the forbidden character as a string".to_string())),
            },
            BuiltinRule::SubjectMaxLength
            | BuiltinRule::HeaderMaxLength
            | BuiltinRule::HeaderMinLength
            | BuiltinRule::BodyMaxLineLength
            | BuiltinRule::FooterMaxLineLength => match param {
                Some(RuleParam::Number(_)) => Ok(()),
                _ => Err(invalid("expected a length".to_string())),
            },
            BuiltinRule::TypeEmpty
            | BuiltinRule::ScopeEmpty
            | BuiltinRule::SubjectEmpty
            | BuiltinRule::BodyLeadingBlank
            | BuiltinRule::FooterLeadingBlank => Ok(()),
        }
    }

    /// Evaluate the rule's base condition, the one `always` asserts.
    ///
    /// Returns `None` when the field the rule inspects is absent; such a
    /// rule passes under either applicability.
    pub fn check(&self, message: &ParsedMessage, param: Option<&RuleParam>) -> Option<bool> {
        match self {
            BuiltinRule::TypeEnum => {
                let commit_type = message.commit_type.as_deref()?;
                Some(list(param).contains(&commit_type))
            }
            BuiltinRule::ScopeEnum => {
                let scope = message.scope.as_deref()?;
                Some(list(param).contains(&scope))
            }
            BuiltinRule::TypeCase => Some(matches_any_case(message.commit_type.as_deref()?, param)),
            BuiltinRule::ScopeCase => Some(matches_any_case(message.scope.as_deref()?, param)),
            BuiltinRule::SubjectCase => {
                let subject = message.subject.as_deref()?;
                let run = leading_alphabetic_run(subject)?;
                Some(matches_any_case(run, param))
            }
            BuiltinRule::TypeEmpty => Some(is_empty(message.commit_type.as_deref())),
            BuiltinRule::ScopeEmpty => Some(is_empty(message.scope.as_deref())),
            BuiltinRule::SubjectEmpty => Some(is_empty(message.subject.as_deref())),
            BuiltinRule::SubjectFullStop => {
                let subject = message.subject.as_deref()?;
                Some(subject.ends_with(full_stop(param)))
            }
            BuiltinRule::SubjectMaxLength => {
                let subject = message.subject.as_deref()?;
                Some(subject.chars().count() <= number(param))
            }
            BuiltinRule::HeaderMaxLength => Some(message.header_len() <= number(param)),
            BuiltinRule::HeaderMinLength => Some(message.header_len() >= number(param)),
            BuiltinRule::BodyLeadingBlank => {
                message.body.as_ref()?;
                Some(message.body_leading_blanks == 1)
            }
            BuiltinRule::FooterLeadingBlank => {
                message.footer.as_ref()?;
                Some(message.footer_leading_blanks == 1)
            }
            BuiltinRule::BodyMaxLineLength => {
                let body = message.body.as_deref()?;
                Some(max_line_len(body) <= number(param))
            }
            BuiltinRule::FooterMaxLineLength => {
                let footer = message.footer.as_deref()?;
                Some(max_line_len(footer) <= number(param))
            }
        }
    }

    /// Human-readable description of a violation.
    pub fn message(
        &self,
        applicability: Applicability,
        param: Option<&RuleParam>,
        parsed: &ParsedMessage,
    ) -> String {
        let must = match applicability {
            Applicability::Always => "must",
            Applicability::Never => "must not",
        };
        let empty = match applicability {
            Applicability::Always => "must be empty",
            Applicability::Never => "may not be empty",
        };

        match self {
            BuiltinRule::TypeEnum => format!("type {} be one of [{}]", must, list(param).join(", ")),
            BuiltinRule::ScopeEnum => {
                format!("scope {} be one of [{}]", must, list(param).join(", "))
            }
            BuiltinRule::TypeCase => format!("type {} be {}", must, list(param).join(", ")),
            BuiltinRule::ScopeCase => format!("scope {} be {}", must, list(param).join(", ")),
            BuiltinRule::SubjectCase => format!("subject {} be {}", must, list(param).join(", ")),
            BuiltinRule::TypeEmpty => format!("type {}", empty),
            BuiltinRule::ScopeEmpty => format!("scope {}", empty),
            BuiltinRule::SubjectEmpty => format!("subject {}", empty),
            BuiltinRule::SubjectFullStop => {
                let stop = match full_stop(param) {
                    "." => "full stop".to_string(),
                    other => format!("'{}'", other),
                };
                match applicability {
                    Applicability::Always => format!("subject must end with {}", stop),
                    Applicability::Never => format!("subject may not end with {}", stop),
                }
            }
            BuiltinRule::SubjectMaxLength => format!(
                "subject {} be longer than {} characters",
                flip(must),
                number(param)
            ),
            BuiltinRule::HeaderMaxLength => format!(
                "header {} be longer than {} characters, current length is {}",
                flip(must),
                number(param),
                parsed.header_len()
            ),
            BuiltinRule::HeaderMinLength => format!(
                "header {} be shorter than {} characters, current length is {}",
                flip(must),
                number(param),
                parsed.header_len()
            ),
            BuiltinRule::BodyLeadingBlank => format!("body {} have leading blank line", must),
            BuiltinRule::FooterLeadingBlank => format!("footer {} have leading blank line", must),
            BuiltinRule::BodyMaxLineLength => format!(
                "body's lines {} be longer than {} characters",
                flip(must),
                number(param)
            ),
            BuiltinRule::FooterMaxLineLength => format!(
                "footer's lines {} be longer than {} characters",
                flip(must),
                number(param)
            ),
        }
    }
}

/// Length rules assert an upper/lower bound, so their wording reads
/// inverted: `always` means "must not be longer".
fn flip(must: &str) -> &'static str {
    if must == "must" {
        "must not"
    } else {
        "must"
    }
}

fn list(param: Option<&RuleParam>) -> Vec<&str> {
    param.and_then(RuleParam::as_list).unwrap_or_default()
}

fn number(param: Option<&RuleParam>) -> usize {
    param.and_then(RuleParam::as_number).unwrap_or(usize::MAX)
}

fn full_stop(param: Option<&RuleParam>) -> &str {
    param.and_then(RuleParam::as_text).unwrap_or(".")
}

fn is_empty(field: Option<&str>) -> bool {
    field.map(|s| s.trim().is_empty()).unwrap_or(true)
}

fn matches_any_case(text: &str, param: Option<&RuleParam>) -> bool {
    list(param)
        .iter()
        .filter_map(|name| name.parse::<CaseStyle>().ok())
        .any(|case| case.matches(text))
}

/// The alphabetic characters the subject starts with, `None` when it does
/// not start with a letter (for example `[PROJ-1] ...`).
fn leading_alphabetic_run(subject: &str) -> Option<&str> {
    let end = subject
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(subject.len());
    if end == 0 {
        None
    } else {
        Some(&subject[..end])
    }
}

fn max_line_len(text: &str) -> usize {
    text.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RuleParam {
        RuleParam::Text(s.to_string())
    }

    fn strings(items: &[&str]) -> RuleParam {
        RuleParam::List(items.iter().map(|s| s.to_string()).collect())
    }

    fn disallowed_cases() -> RuleParam {
        strings(&["sentence-case", "start-case", "pascal-case", "upper-case"])
    }

    #[test]
    fn test_from_name() {
        assert_eq!(BuiltinRule::from_name("type-enum"), Some(BuiltinRule::TypeEnum));
        assert_eq!(BuiltinRule::from_name("subject-ticket"), None);
        for rule in BuiltinRule::all() {
            assert_eq!(BuiltinRule::from_name(rule.name()), Some(*rule));
        }
    }

    #[test]
    fn test_type_enum() {
        let allowed = strings(&["feat", "fix"]);
        let rule = BuiltinRule::TypeEnum;
        assert_eq!(rule.check(&ParsedMessage::parse("feat: x"), Some(&allowed)), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("ci: x"), Some(&allowed)), Some(false));
        assert_eq!(rule.check(&ParsedMessage::parse("Feat: x"), Some(&allowed)), Some(false));
        assert_eq!(rule.check(&ParsedMessage::parse("no type"), Some(&allowed)), None);
    }

    #[test]
    fn test_type_case() {
        let lower = text("lower-case");
        let rule = BuiltinRule::TypeCase;
        assert_eq!(rule.check(&ParsedMessage::parse("feat: x"), Some(&lower)), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("FEAT: x"), Some(&lower)), Some(false));
        assert_eq!(rule.check(&ParsedMessage::parse("Feat: x"), Some(&lower)), Some(false));
    }

    #[test]
    fn test_scope_case_absent_scope() {
        let lower = text("lower-case");
        let rule = BuiltinRule::ScopeCase;
        assert_eq!(rule.check(&ParsedMessage::parse("feat: x"), Some(&lower)), None);
        assert_eq!(rule.check(&ParsedMessage::parse("feat(Auth): x"), Some(&lower)), Some(false));
    }

    #[test]
    fn test_emptiness() {
        let parsed = ParsedMessage::parse("not conventional");
        assert_eq!(BuiltinRule::TypeEmpty.check(&parsed, None), Some(true));
        assert_eq!(BuiltinRule::SubjectEmpty.check(&parsed, None), Some(true));

        let parsed = ParsedMessage::parse("feat:  ");
        assert_eq!(BuiltinRule::SubjectEmpty.check(&parsed, None), Some(true));

        let parsed = ParsedMessage::parse("feat: add");
        assert_eq!(BuiltinRule::TypeEmpty.check(&parsed, None), Some(false));
        assert_eq!(BuiltinRule::SubjectEmpty.check(&parsed, None), Some(false));
    }

    #[test]
    fn test_subject_case_first_run_only() {
        let cases = disallowed_cases();
        let rule = BuiltinRule::SubjectCase;
        assert_eq!(rule.check(&ParsedMessage::parse("feat: Add login"), Some(&cases)), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("feat: ADD LOGIN"), Some(&cases)), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("feat: add login"), Some(&cases)), Some(false));
        assert_eq!(
            rule.check(&ParsedMessage::parse("feat: [NO-TICKET] ADD LOGIN PAGE"), Some(&cases)),
            None
        );
    }

    #[test]
    fn test_subject_full_stop() {
        let rule = BuiltinRule::SubjectFullStop;
        assert_eq!(rule.check(&ParsedMessage::parse("fix: done."), None), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("fix: done"), None), Some(false));
        assert_eq!(
            rule.check(&ParsedMessage::parse("fix: done!"), Some(&text("!"))),
            Some(true)
        );
    }

    #[test]
    fn test_header_max_length_boundary() {
        let max = RuleParam::Number(10);
        let rule = BuiltinRule::HeaderMaxLength;
        assert_eq!(rule.check(&ParsedMessage::parse("fix: abcde"), Some(&max)), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("fix: abcdef"), Some(&max)), Some(false));
    }

    #[test]
    fn test_leading_blank() {
        let rule = BuiltinRule::BodyLeadingBlank;
        assert_eq!(rule.check(&ParsedMessage::parse("fix: a\nbody"), None), Some(false));
        assert_eq!(rule.check(&ParsedMessage::parse("fix: a\n\nbody"), None), Some(true));
        assert_eq!(rule.check(&ParsedMessage::parse("fix: a\n\n\nbody"), None), Some(false));
        assert_eq!(rule.check(&ParsedMessage::parse("fix: a"), None), None);
    }

    #[test]
    fn test_line_lengths() {
        let max = RuleParam::Number(5);
        let parsed = ParsedMessage::parse("fix: a\n\nshort\nmuch longer");
        assert_eq!(BuiltinRule::BodyMaxLineLength.check(&parsed, Some(&max)), Some(false));
        assert_eq!(BuiltinRule::FooterMaxLineLength.check(&parsed, Some(&max)), None);
    }

    #[test]
    fn test_validate_param() {
        assert!(BuiltinRule::TypeEnum.validate_param(Some(&strings(&["feat"]))).is_ok());
        assert!(BuiltinRule::TypeEnum.validate_param(None).is_err());
        assert!(BuiltinRule::TypeCase.validate_param(Some(&text("lower-case"))).is_ok());
        assert!(BuiltinRule::TypeCase.validate_param(Some(&text("title-case"))).is_err());
        assert!(BuiltinRule::HeaderMaxLength.validate_param(Some(&text("100"))).is_err());
        assert!(BuiltinRule::SubjectFullStop.validate_param(None).is_ok());
        assert!(BuiltinRule::BodyLeadingBlank.validate_param(None).is_ok());
    }

    #[test]
    fn test_messages() {
        let parsed = ParsedMessage::parse("fix: a");
        assert_eq!(
            BuiltinRule::TypeEmpty.message(Applicability::Never, None, &parsed),
            "type may not be empty"
        );
        assert_eq!(
            BuiltinRule::SubjectFullStop.message(Applicability::Never, Some(&text(".")), &parsed),
            "subject may not end with full stop"
        );
        assert_eq!(
            BuiltinRule::HeaderMaxLength.message(
                Applicability::Always,
                Some(&RuleParam::Number(100)),
                &parsed
            ),
            "header must not be longer than 100 characters, current length is 6"
        );
        assert_eq!(
            BuiltinRule::SubjectCase.message(Applicability::Never, Some(&disallowed_cases()), &parsed),
            "subject must not be sentence-case, start-case, pascal-case, upper-case"
        );
    }
}
