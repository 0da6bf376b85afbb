// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! commit-config - Conventional commit message linter
//!
//! Parses commit messages into their conventional-commit parts and checks
//! them against a configurable, ordered rule set.
//!
//! # Features
//!
//! - **Parser**: Header, body, footer and reference extraction that never fails
//! - **Rule Engine**: Built-in rules with severity and `always`/`never` applicability
//! - **Plugin Registry**: Custom rules merged with the built-ins under unique names
//! - **Linter**: Ordered, deterministic reports split into errors and warnings
//! - **Git Integration**: Lint existing commits and ranges
//!
//! # Example
//!
//! ```no_run
//! use commit_config::{LintConfig, Linter};
//!
//! // Load configuration
//! let config = LintConfig::load().unwrap();
//!
//! // Build the linter once, then lint any number of messages
//! let linter = Linter::from_config(config).unwrap();
//! let report = linter.lint("feat(parser): [AB-12] support footers");
//!
//! if !report.is_valid() {
//!     for error in report.errors() {
//!         println!("{}", error.format());
//!     }
//! }
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod plugins;
pub mod rules;

// Re-exports for convenience
pub use commit::ParsedMessage;
pub use config::LintConfig;
pub use error::{CcError, Result};
pub use plugins::PluginRegistry;
pub use rules::{lint, LintReport, Linter, Rule, RuleOutcome};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of commit-config.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_starts_with_package_version() {
        assert!(version::version_string().starts_with(version::VERSION));
    }
}
