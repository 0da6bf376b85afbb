// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint orchestration: parse once, run every configured rule, aggregate.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::ParsedMessage;
use crate::config::LintConfig;
use crate::error::{ConfigError, Result};
use crate::plugins::{PluginRegistry, RuleImpl};

use super::engine::RuleEngine;
use super::report::LintReport;

lazy_static! {
    /// Headers git and hosting services generate, skipped when
    /// `default_ignores` is on.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?))))",
        r"^Merge tag (.*?)",
        r"^Merge remote-tracking branch (.*?)",
        r"^Merged (.*?) (in|into) (.*)",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)! ",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Lints commit messages against a fixed configuration.
///
/// Construction validates the configuration and resolves plugins; after
/// that the linter is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Linter {
    config: Arc<LintConfig>,
    engine: RuleEngine,
    ignores: Vec<Regex>,
}

impl Linter {
    /// Create a linter from a configuration and a plugin registry.
    pub fn new(config: LintConfig, registry: &PluginRegistry) -> Result<Self> {
        let table = registry.resolve()?;

        for rule in &config.rules {
            match table.get(&rule.name) {
                Some(RuleImpl::Builtin(builtin)) => builtin.validate_param(rule.param.as_ref())?,
                Some(RuleImpl::Plugin(_)) => {}
                None => {
                    return Err(ConfigError::UnknownRule {
                        name: rule.name.clone(),
                    }
                    .into())
                }
            }
        }

        let ignores = config
            .ignores
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                    name: "ignores".to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Linter ready: {} configured rules, {} custom ignores",
            config.rules.len(),
            ignores.len()
        );

        Ok(Self {
            config: Arc::new(config),
            engine: RuleEngine::new(Arc::new(table)),
            ignores,
        })
    }

    /// Create a linter with the bundled plugins and the configuration's
    /// pattern plugins.
    pub fn from_config(config: LintConfig) -> Result<Self> {
        let registry = PluginRegistry::from_config(&config)?;
        Self::new(config, &registry)
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Whether a message is skipped by the default or configured ignores.
    pub fn is_ignored(&self, message: &str) -> bool {
        let header = message.trim().lines().next().unwrap_or("");
        let default_hit =
            self.config.default_ignores && DEFAULT_IGNORES.iter().any(|re| re.is_match(header));
        default_hit || self.ignores.iter().any(|re| re.is_match(header))
    }

    /// Lint a commit message.
    ///
    /// Results follow configuration order; warnings never affect validity.
    pub fn lint(&self, message: &str) -> LintReport {
        if self.is_ignored(message) {
            tracing::debug!("Message ignored: {:?}", message.lines().next());
            return LintReport::ignored(message.trim());
        }

        let parsed = ParsedMessage::parse(message);
        let results = self
            .config
            .rules
            .iter()
            .filter_map(|rule| self.engine.evaluate(rule, &parsed));

        LintReport::new(parsed.raw.clone(), results)
    }
}

/// Lint one message, resolving plugins for this call only.
pub fn lint(message: &str, config: &LintConfig, registry: &PluginRegistry) -> Result<LintReport> {
    let linter = Linter::new(config.clone(), registry)?;
    Ok(linter.lint(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CcError, PluginError};
    use crate::rules::{Applicability, Rule, RuleConfig, RuleOutcome, RuleParam, Severity};

    fn default_linter() -> Linter {
        Linter::from_config(LintConfig::default()).unwrap()
    }

    fn error_names(report: &LintReport) -> Vec<&str> {
        report.errors().iter().map(|r| r.name.as_str()).collect()
    }

    fn warning_names(report: &LintReport) -> Vec<&str> {
        report.warnings().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_full_valid_message() {
        let msg = "feat(auth): [PROJ-42] add token refresh rotation\n\n\
                   Rotates the refresh token on each use to reduce the risk\n\
                   of token theft via replay attacks.\n\n\
                   Closes: #42";
        let report = default_linter().lint(msg);
        assert!(report.is_valid(), "{:?}", report.errors());
        assert!(report.errors().is_empty());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_type_enum() {
        let linter = default_linter();
        for commit_type in [
            "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "chore", "revert",
        ] {
            let report = linter.lint(&format!("{}: [NO-TICKET] some change", commit_type));
            assert!(!error_names(&report).contains(&"type-enum"), "{}", commit_type);
        }

        let report = linter.lint("ci: [NO-TICKET] configure pipeline");
        assert!(!report.is_valid());
        assert!(error_names(&report).contains(&"type-enum"));

        let report = linter.lint("wip: [NO-TICKET] work in progress");
        assert!(error_names(&report).contains(&"type-enum"));
    }

    #[test]
    fn test_type_case() {
        let linter = default_linter();
        assert!(error_names(&linter.lint("FEAT: [NO-TICKET] add feature")).contains(&"type-case"));
        assert!(error_names(&linter.lint("Feat: [NO-TICKET] add feature")).contains(&"type-case"));
        assert!(!error_names(&linter.lint("feat: [NO-TICKET] add feature")).contains(&"type-case"));
    }

    #[test]
    fn test_scope_case() {
        let linter = default_linter();
        assert!(linter.lint("feat(auth): [NO-TICKET] add oauth").is_valid());
        let report = linter.lint("feat(Auth): [NO-TICKET] add oauth");
        assert!(!report.is_valid());
        assert!(error_names(&report).contains(&"scope-case"));
    }

    #[test]
    fn test_subject_case_known_limitation() {
        let linter = default_linter();
        let report = linter.lint("feat: [NO-TICKET] Add login page");
        assert!(!error_names(&report).contains(&"subject-case"));
        let report = linter.lint("feat: [NO-TICKET] ADD LOGIN PAGE");
        assert!(!error_names(&report).contains(&"subject-case"));

        let report = linter.lint("feat: Add login page");
        assert!(error_names(&report).contains(&"subject-case"));
        assert!(error_names(&report).contains(&"subject-ticket"));
    }

    #[test]
    fn test_subject_full_stop() {
        let linter = default_linter();
        let report = linter.lint("fix: [NO-TICKET] correct the bug.");
        assert!(!report.is_valid());
        assert!(error_names(&report).contains(&"subject-full-stop"));
        assert!(linter.lint("fix: [NO-TICKET] correct the bug").is_valid());
    }

    #[test]
    fn test_header_max_length_boundary() {
        let linter = default_linter();
        let at_limit = format!("fix: [NO-TICKET] {}", "x".repeat(83));
        assert_eq!(at_limit.chars().count(), 100);
        assert!(!error_names(&linter.lint(&at_limit)).contains(&"header-max-length"));

        let over = format!("fix: [NO-TICKET] {}", "x".repeat(84));
        let report = linter.lint(&over);
        assert!(!report.is_valid());
        assert!(error_names(&report).contains(&"header-max-length"));
    }

    #[test]
    fn test_leading_blank_warnings() {
        let linter = default_linter();

        let report = linter.lint("fix: [NO-TICKET] correct bug\nbody without blank line");
        assert!(warning_names(&report).contains(&"body-leading-blank"));
        assert!(report.is_valid());

        let report = linter.lint("fix: [NO-TICKET] correct bug\n\nbody with blank line");
        assert!(!warning_names(&report).contains(&"body-leading-blank"));

        let report = linter.lint("fix: [NO-TICKET] correct bug\n\nbody\nCloses: #1");
        assert!(warning_names(&report).contains(&"footer-leading-blank"));

        let report = linter.lint("fix: [NO-TICKET] correct bug\n\nbody\n\nCloses: #1");
        assert!(!warning_names(&report).contains(&"footer-leading-blank"));
    }

    #[test]
    fn test_colon_line_in_body_is_not_a_footer() {
        let report = default_linter().lint(
            "fix: [NO-TICKET] handle large inputs\n\n\
             The parser now streams its input.\n\
             Caveat: slower on tiny inputs.\n\n\
             Closes: #1",
        );
        assert!(report.is_valid());
        assert!(report.warnings().is_empty(), "{:?}", report.warnings());
    }

    #[test]
    fn test_non_conventional_header() {
        let report = default_linter().lint("just some words");
        let errors = error_names(&report);
        assert!(errors.contains(&"type-empty"));
        assert!(errors.contains(&"subject-empty"));
    }

    #[test]
    fn test_errors_follow_configuration_order() {
        let report = default_linter().lint("WIP: Add stuff.");
        assert_eq!(
            error_names(&report),
            vec![
                "type-enum",
                "type-case",
                "subject-case",
                "subject-full-stop",
                "subject-ticket"
            ]
        );
    }

    #[test]
    fn test_lint_is_idempotent() {
        let linter = default_linter();
        let msg = "Feat(Core): Broken message.\nno blank";
        assert_eq!(linter.lint(msg), linter.lint(msg));
    }

    #[test]
    fn test_valid_iff_no_error_fails() {
        let linter = default_linter();
        for msg in [
            "feat: [NO-TICKET] ok",
            "fix: [AB-1] x\nbody",
            "nope",
            "ci: [NO-TICKET] x",
            "feat: [NO-TICKET] x\n\nbody\nRefs #1",
        ] {
            let report = linter.lint(msg);
            assert_eq!(report.is_valid(), report.errors().is_empty(), "{}", msg);
        }
    }

    #[test]
    fn test_default_ignores() {
        let linter = default_linter();
        let report = linter.lint("Merge branch 'main' into feature/x");
        assert!(report.is_valid());
        assert!(report.is_ignored());
        assert!(linter.is_ignored("fixup! feat: [NO-TICKET] x"));
        assert!(linter.is_ignored("Revert \"feat: x\""));
        assert!(!linter.is_ignored("feat: [NO-TICKET] merge branches"));
    }

    #[test]
    fn test_custom_ignores_and_disabled_defaults() {
        let config = LintConfig {
            default_ignores: false,
            ignores: vec!["^WIP".to_string()],
            ..LintConfig::default()
        };
        let linter = Linter::from_config(config).unwrap();
        assert!(linter.is_ignored("WIP on everything"));
        assert!(!linter.is_ignored("Merge branch 'main'"));
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let config = LintConfig {
            rules: vec![RuleConfig::new("subject-tiket", Severity::Error, Applicability::Always)],
            ..LintConfig::default()
        };
        let err = Linter::from_config(config).unwrap_err();
        assert!(matches!(err, CcError::Config(ConfigError::UnknownRule { .. })));
    }

    #[test]
    fn test_bad_builtin_param_is_config_error() {
        let config = LintConfig {
            rules: vec![
                RuleConfig::new("header-max-length", Severity::Error, Applicability::Always)
                    .with_param(RuleParam::Text("100".to_string())),
            ],
            ..LintConfig::default()
        };
        assert!(matches!(
            Linter::from_config(config),
            Err(CcError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_bad_ignore_pattern_is_config_error() {
        let config = LintConfig {
            ignores: vec!["(".to_string()],
            ..LintConfig::default()
        };
        assert!(matches!(
            Linter::from_config(config),
            Err(CcError::Config(ConfigError::InvalidPattern { .. }))
        ));
    }

    #[derive(Debug)]
    struct Exploding;

    impl Rule for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        fn evaluate(&self, _message: &ParsedMessage) -> std::result::Result<RuleOutcome, PluginError> {
            Err(PluginError::ExecutionFailed {
                name: "exploding".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_failing_plugin_is_isolated() {
        let mut config = LintConfig::default();
        config.rules.push(RuleConfig::new(
            "exploding",
            Severity::Warning,
            Applicability::Always,
        ));
        let registry = PluginRegistry::with_defaults().with(Exploding);

        let report = lint("fix: [NO-TICKET] correct", &config, &registry).unwrap();
        assert!(report.is_valid());
        assert_eq!(warning_names(&report), vec!["exploding"]);
        assert!(report.warnings()[0].message.contains("boom"));
    }

    #[derive(Debug)]
    struct NeedsScope;

    impl Rule for NeedsScope {
        fn name(&self) -> &str {
            "needs-scope"
        }

        fn evaluate(&self, message: &ParsedMessage) -> std::result::Result<RuleOutcome, PluginError> {
            let scope = message.scope.as_deref().unwrap();
            Ok(RuleOutcome::new(!scope.is_empty(), "scope required"))
        }
    }

    #[test]
    fn test_panicking_plugin_is_isolated() {
        let mut config = LintConfig::default();
        config.rules.push(RuleConfig::new(
            "needs-scope",
            Severity::Error,
            Applicability::Always,
        ));
        let registry = PluginRegistry::with_defaults().with(NeedsScope);

        let report = lint("fix: [NO-TICKET] correct", &config, &registry).unwrap();
        assert!(!report.is_valid());
        assert_eq!(error_names(&report), vec!["needs-scope"]);
        assert!(report.errors()[0].message.contains("panicked"));

        let report = lint("fix(core): [NO-TICKET] correct", &config, &registry).unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn test_plugin_colliding_with_builtin_aborts() {
        let registry = PluginRegistry::new().with(
            crate::plugins::PatternRule::new(
                "type-enum",
                crate::plugins::MessageField::Type,
                ".*",
                "x",
            )
            .unwrap(),
        );
        let result = lint("feat: x", &LintConfig::default(), &registry);
        assert!(matches!(
            result,
            Err(CcError::Config(ConfigError::DuplicateRule { .. }))
        ));
    }

    #[test]
    fn test_severity_zero_never_reported() {
        let mut config = LintConfig::default();
        for rule in &mut config.rules {
            rule.severity = Severity::Off;
        }
        let report = Linter::from_config(config).unwrap().lint("NOT: Valid At All.");
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_linter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Linter>();
    }
}
