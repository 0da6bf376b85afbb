// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Plugin registry and the resolved rule table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::LintConfig;
use crate::error::ConfigError;
use crate::rules::{BuiltinRule, Rule};

use super::pattern::PatternRule;
use super::ticket::ticket_rule;

/// A rule the engine can evaluate.
#[derive(Debug, Clone)]
pub enum RuleImpl {
    Builtin(BuiltinRule),
    Plugin(Arc<dyn Rule>),
}

impl RuleImpl {
    pub fn is_builtin(&self) -> bool {
        matches!(self, RuleImpl::Builtin(_))
    }
}

/// Built-in and plugin rules merged under unique names.
#[derive(Debug, Default)]
pub struct RuleTable {
    entries: Vec<(String, RuleImpl)>,
    index: HashMap<String, usize>,
}

impl RuleTable {
    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleImpl> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Rule names, built-ins first, then plugins in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, name: &str, rule: RuleImpl) -> Result<(), ConfigError> {
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateRule {
                name: name.to_string(),
            });
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), rule));
        Ok(())
    }
}

/// Collects plugin rules before they are merged with the built-ins.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Rule>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the bundled plugins (`subject-ticket`).
    pub fn with_defaults() -> Self {
        Self::new().with(ticket_rule())
    }

    /// Create a registry holding the bundled plugins plus the pattern
    /// rules declared in the configuration.
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::with_defaults();
        for plugin in &config.plugins {
            registry.register(Arc::new(PatternRule::from_config(plugin)?));
        }
        Ok(registry)
    }

    /// Add a plugin rule.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        tracing::debug!("Registering plugin rule: {}", rule.name());
        self.plugins.push(rule);
    }

    /// Add a plugin rule, builder style.
    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.register(Arc::new(rule));
        self
    }

    /// Names of the registered plugins.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name())
    }

    /// Merge the plugins with the built-in rules.
    ///
    /// Fails if a plugin reuses a built-in name or another plugin's name.
    pub fn resolve(&self) -> Result<RuleTable, ConfigError> {
        let mut table = RuleTable::default();

        for builtin in BuiltinRule::all() {
            table.insert(builtin.name(), RuleImpl::Builtin(*builtin))?;
        }
        for plugin in &self.plugins {
            table.insert(plugin.name(), RuleImpl::Plugin(Arc::clone(plugin)))?;
        }

        tracing::debug!(
            "Resolved {} rules ({} plugins)",
            table.len(),
            self.plugins.len()
        );
        Ok(table)
    }
}
