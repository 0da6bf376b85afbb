// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Reads commit messages from a repository so existing history can be linted.

mod repo;

pub use repo::{open_repo, Repository};
