// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Each configured rule is evaluated against a parsed message by the
//! [`RuleEngine`]; the [`Linter`] runs the configured set in order and
//! aggregates the results into a [`LintReport`].

mod builtin;
mod case;
mod definition;
mod engine;
mod lint;
mod report;

pub use builtin::{BuiltinRule, Rule, RuleOutcome};
pub use case::CaseStyle;
pub use definition::{Applicability, RuleConfig, RuleParam, Severity};
pub use engine::RuleEngine;
pub use lint::{lint, Linter};
pub use report::{Level, LintReport, RuleResult};
