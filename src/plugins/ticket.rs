// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The bundled ticket-prefix rule.

use lazy_static::lazy_static;
use regex::Regex;

use super::pattern::{MessageField, PatternRule};

/// Name the ticket rule registers under.
pub const TICKET_RULE: &str = "subject-ticket";

/// A ticket key of 2-5 capitals and a number, or the literal `NO-TICKET`,
/// in brackets, followed by a description.
pub const TICKET_PATTERN: &str = r"^\[([A-Z]{2,5}-[0-9]+|NO-TICKET)\].+$";

const TICKET_MESSAGE: &str = "Subject must follow this format: [<TICKET-ID>|NO-TICKET] <description>";

lazy_static! {
    static ref TICKET_REGEX: Regex = Regex::new(TICKET_PATTERN).unwrap();
}

/// The `subject-ticket` rule.
pub fn ticket_rule() -> PatternRule {
    PatternRule::from_regex(
        TICKET_RULE,
        MessageField::Subject,
        TICKET_REGEX.clone(),
        TICKET_MESSAGE,
    )
}
