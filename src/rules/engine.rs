// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine: evaluates one configured rule against a parsed message.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::commit::ParsedMessage;
use crate::plugins::{RuleImpl, RuleTable};

use super::definition::RuleConfig;
use super::report::RuleResult;

/// Rule engine over a resolved rule table.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    table: Arc<RuleTable>,
}

impl RuleEngine {
    /// Create a new rule engine over a resolved table.
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// The rule table this engine resolves names against.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Evaluate one configured rule.
    ///
    /// Returns `None` for rules at severity 0. A plugin that returns an
    /// error or panics fails its own rule with a diagnostic message.
    pub fn evaluate(&self, rule: &RuleConfig, message: &ParsedMessage) -> Option<RuleResult> {
        let level = rule.severity.level()?;
        let param = rule.param.as_ref();

        let (passed, text) = match self.table.get(&rule.name) {
            Some(RuleImpl::Builtin(builtin)) => {
                let passed = builtin
                    .check(message, param)
                    .map(|condition| rule.applicability.apply(condition))
                    .unwrap_or(true);
                (passed, builtin.message(rule.applicability, param, message))
            }
            Some(RuleImpl::Plugin(plugin)) => {
                match panic::catch_unwind(AssertUnwindSafe(|| plugin.evaluate(message))) {
                    Ok(Ok(outcome)) => (rule.applicability.apply(outcome.passed), outcome.message),
                    Ok(Err(e)) => {
                        tracing::warn!("Rule '{}' failed to evaluate: {}", rule.name, e);
                        (false, format!("rule could not be evaluated: {}", e))
                    }
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        tracing::warn!("Rule '{}' panicked: {}", rule.name, reason);
                        (false, format!("rule could not be evaluated: panicked: {}", reason))
                    }
                }
            }
            None => (false, format!("rule '{}' is not registered", rule.name)),
        };

        tracing::debug!("Rule {} -> {}", rule.name, if passed { "pass" } else { "fail" });

        Some(RuleResult {
            name: rule.name.clone(),
            level,
            passed,
            message: text,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
