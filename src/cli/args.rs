// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// commit-config - Conventional commit message linter
///
/// Validates commit messages against a configurable rule set.
#[derive(Parser, Debug)]
#[command(name = "commit-config")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message file (commit-msg hook entrypoint)
    Lint(LintArgs),

    /// Lint existing commits
    Check(CheckArgs),

    /// List the available rules and their configuration
    Rules,

    /// Write an example configuration file
    Init(InitArgs),

    /// Show version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Clone)]
pub struct LintArgs {
    /// Commit message file, or `-` to read from stdin
    pub file: PathBuf,
}

impl LintArgs {
    /// Whether the message comes from stdin.
    pub fn is_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Commit or range to check (a reference or `A..B`)
    #[arg(default_value = "HEAD")]
    pub target: String,

    /// Check the target and all of its ancestors
    #[arg(long)]
    pub range: bool,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            target: "HEAD".to_string(),
            range: false,
            strict: false,
        }
    }
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// The output format, defaulting to text.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Text)
    }
}
