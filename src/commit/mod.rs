// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message parsing.

mod message;

pub use message::{strip_comments, FooterToken, ParsedMessage};
