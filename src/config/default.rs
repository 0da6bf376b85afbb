// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use crate::plugins::TICKET_RULE;
use crate::rules::{Applicability, RuleConfig, RuleParam, Severity};

/// Commit types the default rule set allows.
pub const DEFAULT_TYPES: &[&str] = &[
    "feat", "fix", "refactor", "test", "docs", "build", "chore", "revert", "style", "perf",
];

/// Maximum header length of the default rule set.
pub const DEFAULT_HEADER_MAX_LENGTH: usize = 100;

/// The rule set used when no configuration file sets `[rules]`.
pub fn default_rules() -> Vec<RuleConfig> {
    use Applicability::{Always, Never};
    use Severity::{Error, Warning};

    let strings = |items: &[&str]| RuleParam::List(items.iter().map(|s| s.to_string()).collect());
    let text = |s: &str| RuleParam::Text(s.to_string());

    vec![
        RuleConfig::new("type-enum", Error, Always).with_param(strings(DEFAULT_TYPES)),
        RuleConfig::new("type-case", Error, Always).with_param(text("lower-case")),
        RuleConfig::new("type-empty", Error, Never),
        RuleConfig::new("scope-case", Error, Always).with_param(text("lower-case")),
        RuleConfig::new("subject-empty", Error, Never),
        RuleConfig::new("subject-case", Error, Never).with_param(strings(&[
            "sentence-case",
            "start-case",
            "pascal-case",
            "upper-case",
        ])),
        RuleConfig::new("subject-full-stop", Error, Never).with_param(text(".")),
        RuleConfig::new(TICKET_RULE, Error, Always),
        RuleConfig::new("header-max-length", Error, Always)
            .with_param(RuleParam::Number(DEFAULT_HEADER_MAX_LENGTH)),
        RuleConfig::new("body-leading-blank", Warning, Always),
        RuleConfig::new("footer-leading-blank", Warning, Always),
    ]
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r##"# commit-config configuration

# Skip merge, revert and fixup!/squash! commits.
default_ignores = true

# Extra header patterns to skip (regular expressions).
ignores = []

# Comment prefix stripped from commit message files ("" keeps every line).
comment_char = "#"

# Rules: [severity, applicability, parameter]
#   severity: 0 = off, 1 = warning, 2 = error
#   applicability: "always" or "never"
# Rules run in the order they are declared here.
[rules]
type-enum = [2, "always", ["feat", "fix", "refactor", "test", "docs", "build", "chore", "revert", "style", "perf"]]
type-case = [2, "always", "lower-case"]
type-empty = [2, "never"]
scope-case = [2, "always", "lower-case"]
subject-empty = [2, "never"]
subject-case = [2, "never", ["sentence-case", "start-case", "pascal-case", "upper-case"]]
subject-full-stop = [2, "never", "."]
subject-ticket = [2, "always"]
header-max-length = [2, "always", 100]
body-leading-blank = [1, "always"]
footer-leading-blank = [1, "always"]

# Custom pattern rules. Enable them under [rules] by name.
# [[plugins]]
# name = "scope-component"
# field = "scope"
# pattern = "^(api|cli|core)$"
# message = "scope must name a component"
"##
}
