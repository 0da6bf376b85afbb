// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint results.

use crate::cli::args::OutputFormat;
use console::{style, Style};
use serde::Serialize;

/// Severity of a reported rule result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

/// Outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    /// Rule name.
    pub name: String,
    /// Level the rule is configured at.
    pub level: Level,
    /// Whether the rule passed after applying its applicability.
    pub passed: bool,
    /// Human-readable message.
    pub message: String,
}

impl RuleResult {
    /// Format the result for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = match self.level {
            Level::Error => (style("✖").red().bold(), Style::new().red()),
            Level::Warning => (style("⚠").yellow().bold(), Style::new().yellow()),
        };

        format!(
            "{} {} {}",
            prefix,
            self.message,
            code_style.apply_to(format!("[{}]", self.name))
        )
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    valid: bool,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<String>,
    ignored: bool,
    errors: Vec<RuleResult>,
    warnings: Vec<RuleResult>,
}

impl LintReport {
    /// Build a report from rule results, keeping their order. Passing
    /// results are dropped.
    pub fn new(input: impl Into<String>, results: impl IntoIterator<Item = RuleResult>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for result in results.into_iter().filter(|r| !r.passed) {
            match result.level {
                Level::Error => errors.push(result),
                Level::Warning => warnings.push(result),
            }
        }

        Self {
            valid: errors.is_empty(),
            input: input.into(),
            commit: None,
            ignored: false,
            errors,
            warnings,
        }
    }

    /// A report for a message that matched an ignore pattern.
    pub fn ignored(input: impl Into<String>) -> Self {
        let mut report = Self::new(input, Vec::new());
        report.ignored = true;
        report
    }

    /// Attach the SHA of the commit the message came from.
    pub fn with_commit(mut self, sha: impl Into<String>) -> Self {
        self.commit = Some(sha.into());
        self
    }

    /// Whether no error-level rule failed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the message was skipped by an ignore pattern.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    pub fn errors(&self) -> &[RuleResult] {
        &self.errors
    }

    pub fn warnings(&self) -> &[RuleResult] {
        &self.warnings
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Render the report in the requested format.
    pub fn render(&self, format: Option<OutputFormat>) -> String {
        match format {
            Some(OutputFormat::Json) => self.render_json(),
            _ => self.render_text(),
        }
    }

    fn render_text(&self) -> String {
        let mut lines = Vec::new();

        if let Some(ref sha) = self.commit {
            let short_sha = &sha[..7.min(sha.len())];
            let first_line = self.input.lines().next().unwrap_or("");
            let status = if self.ignored {
                style("-").dim()
            } else if self.valid {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            lines.push(format!("{} {} {}", status, style(short_sha).cyan(), first_line));
        }

        for error in &self.errors {
            lines.push(format!("   {}", error.format()));
        }
        for warning in &self.warnings {
            lines.push(format!("   {}", warning.format()));
        }

        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            "Ignored".to_string()
        } else if self.valid {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, level: Level, passed: bool) -> RuleResult {
        RuleResult {
            name: name.to_string(),
            level,
            passed,
            message: format!("{} message", name),
        }
    }

    #[test]
    fn test_report_valid() {
        let report = LintReport::new("feat: test", Vec::new());
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
        assert_eq!(report.summary(), "Valid");
    }

    #[test]
    fn test_report_partitions_and_keeps_order() {
        let report = LintReport::new(
            "x",
            vec![
                result("type-enum", Level::Error, false),
                result("type-case", Level::Error, true),
                result("body-leading-blank", Level::Warning, false),
                result("header-max-length", Level::Error, false),
            ],
        );

        assert!(!report.is_valid());
        let names: Vec<&str> = report.errors().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["type-enum", "header-max-length"]);
        assert_eq!(report.warnings().len(), 1);
        assert!(report.summary().contains("Invalid"));
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let report = LintReport::new("x", vec![result("footer-leading-blank", Level::Warning, false)]);
        assert!(report.is_valid());
        assert!(report.summary().contains("1 warnings"));
    }

    #[test]
    fn test_ignored_report() {
        let report = LintReport::ignored("Merge branch 'main'");
        assert!(report.is_valid());
        assert!(report.is_ignored());
        assert_eq!(report.summary(), "Ignored");
    }

    #[test]
    fn test_render_text() {
        let report = LintReport::new("x", vec![result("type-enum", Level::Error, false)])
            .with_commit("0123456789abcdef");
        let text = report.render(Some(OutputFormat::Text));
        assert!(text.contains("0123456"));
        assert!(text.contains("type-enum message"));
        assert!(text.contains("[type-enum]"));
    }

    #[test]
    fn test_render_json() {
        let report = LintReport::new("x", vec![result("type-enum", Level::Error, false)]);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(Some(OutputFormat::Json))).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["name"], "type-enum");
        assert_eq!(json["errors"][0]["level"], "error");
        assert!(json.get("commit").is_none());
    }
}
