// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for commit-config.
//!
//! This module handles discovering and parsing `commitlint.toml`, falling
//! back to the built-in rule set when no file is found.

pub mod default;
mod loader;
mod schema;

pub use default::{default_rules, example_config};
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config, CONFIG_FILES};
pub use schema::LintConfig;
