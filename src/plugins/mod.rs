// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Custom rule plugins.
//!
//! Plugins are resolved into a [`RuleTable`] once, when a linter is built.
//! The table is never mutated afterwards.

mod pattern;
mod registry;
mod ticket;

pub use pattern::{MessageField, PatternPluginConfig, PatternRule};
pub use registry::{PluginRegistry, RuleImpl, RuleTable};
pub use ticket::{ticket_rule, TICKET_PATTERN, TICKET_RULE};
