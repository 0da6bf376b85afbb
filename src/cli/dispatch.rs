// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;
use std::path::Path;

use console::style;
use rayon::prelude::*;

use crate::commit::strip_comments;
use crate::config::{example_config, LintConfig};
use crate::error::{CcError, CommitError, ConfigError, Result, ResultExt, ValidationError};
use crate::plugins::RuleImpl;
use crate::rules::{LintReport, Linter};

use super::args::{CheckArgs, Cli, Commands, InitArgs, LintArgs, OutputFormat};

/// Name of the file written by `init`.
const CONFIG_FILE_NAME: &str = "commitlint.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Commands that need no configuration
    match &cli.command {
        Commands::Version => return run_version(),
        Commands::Init(args) => return run_init(args),
        _ => {}
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        LintConfig::load_from(config_path)?
    } else {
        LintConfig::load()?
    };

    let linter = Linter::from_config(config)?;

    // Dispatch to the appropriate command handler
    match &cli.command {
        Commands::Lint(args) => run_lint(&cli, &linter, args),
        Commands::Check(args) => run_check(&cli, &linter, args),
        Commands::Rules => run_rules(&cli, &linter),
        Commands::Version | Commands::Init(_) => Ok(()),
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, linter: &Linter, args: &LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let raw = read_message(args)?;
    let message = strip_comments(&raw, linter.config().comment_char);
    let report = linter.lint(&message);

    match cli.output_format() {
        OutputFormat::Json => println!("{}", report.render(cli.format)),
        OutputFormat::Text => {
            if !report.is_valid() {
                eprintln!("{}", style("✖  Invalid commit message:").red().bold());
                eprintln!("{}", report.render(cli.format));
                eprintln!();
                eprintln!(
                    "{} {}",
                    style("Expected format:").dim(),
                    style("<type>(<scope>): <subject>").cyan()
                );
            } else if !report.warnings().is_empty() {
                eprintln!("{}", report.render(cli.format));
            }
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(CcError::Validation(ValidationError::InvalidMessage {
            errors: report.errors().len(),
            warnings: report.warnings().len(),
        }))
    }
}

fn read_message(args: &LintArgs) -> Result<String> {
    let read_failed = |e: std::io::Error| {
        CcError::Commit(CommitError::ReadFailed {
            path: args.file.clone(),
            message: e.to_string(),
        })
    };

    if args.is_stdin() {
        let mut message = String::new();
        std::io::stdin()
            .read_to_string(&mut message)
            .map_err(read_failed)?;
        Ok(message)
    } else {
        std::fs::read_to_string(&args.file).map_err(read_failed)
    }
}

/// Run the check command.
fn run_check(cli: &Cli, linter: &Linter, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let repo = crate::git::open_repo()?;
    let commits = if args.target.contains("..") {
        repo.get_commits_in_range(&args.target)?
    } else if args.range {
        repo.get_history(&args.target)?
    } else {
        repo.get_commits_in_range(&args.target)?
    };

    let reports: Vec<LintReport> = commits
        .par_iter()
        .map(|(oid, message)| linter.lint(message).with_commit(oid.to_string()))
        .collect();

    // Output results
    match cli.output_format() {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&reports).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.render(cli.format));
            }
        }
    }

    // Determine exit status
    let failed = reports
        .iter()
        .filter(|r| !r.is_valid() || (args.strict && !r.warnings().is_empty()))
        .count();

    if cli.output_format() == OutputFormat::Text {
        println!();
        println!(
            "{} commits checked, {} failed",
            reports.len(),
            if failed > 0 {
                style(failed).red().bold()
            } else {
                style(failed).green().bold()
            }
        );
    }

    if failed > 0 {
        Err(CcError::Validation(ValidationError::InvalidCommits {
            failed,
            total: reports.len(),
        }))
    } else {
        Ok(())
    }
}

/// Run the rules command.
fn run_rules(cli: &Cli, linter: &Linter) -> Result<()> {
    let table = linter.engine().table();
    let config = linter.config();

    if cli.output_format() == OutputFormat::Json {
        let rules: Vec<serde_json::Value> = table
            .names()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "kind": rule_kind(table.get(name)),
                    "config": config.rule(name).map(|r| r.to_string()),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rules).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", style("Available rules:").bold());
    for name in table.names() {
        let status = match config.rule(name) {
            Some(rule) if rule.severity.level().is_some() => style(rule.to_string()).green(),
            Some(rule) => style(format!("{} (off)", rule)).dim(),
            None => style("not configured".to_string()).dim(),
        };
        println!(
            "  {:<24} {:<8} {}",
            name,
            style(rule_kind(table.get(name))).dim(),
            status
        );
    }

    Ok(())
}

fn rule_kind(rule: Option<&RuleImpl>) -> &'static str {
    match rule {
        Some(RuleImpl::Builtin(_)) => "builtin",
        Some(RuleImpl::Plugin(_)) => "plugin",
        None => "unknown",
    }
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("commit-config {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() && !args.force {
        return Err(CcError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green().bold(), CONFIG_FILE_NAME);

    Ok(())
}
