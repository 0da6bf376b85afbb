// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Conventional header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?: (?P<subject>.*)$"
    ).unwrap();

    /// A footer token line: `Key: value` or `Key #id`.
    static ref FOOTER_TOKEN_REGEX: Regex = Regex::new(
        r"^(?:(?P<key>BREAKING CHANGE|BREAKING-CHANGE|[A-Za-z][\w-]*): (?P<value>.*)|(?P<ref_key>[A-Za-z][\w-]*) #(?P<ref_id>\S+))$"
    ).unwrap();
}

/// Marker git writes above the diff in verbose commit templates.
const SCISSORS: &str = "------------------------ >8 ------------------------";

/// A single `Key: value` or `Key #id` entry from the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterToken {
    /// Token key (`Closes`, `Signed-off-by`, `BREAKING CHANGE`).
    pub key: String,
    /// Token value, continuation lines included.
    pub value: String,
}

/// A commit message split into its conventional fields.
///
/// Parsing never fails. A header that is not `type[(scope)][!]: subject`
/// leaves `commit_type`, `scope` and `subject` empty so the emptiness
/// rules can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    /// The trimmed input.
    pub raw: String,
    /// First line of the message, verbatim.
    pub header: String,
    /// Commit type, `None` when missing.
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject, `None` when the header did not parse.
    pub subject: Option<String>,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer block.
    pub footer: Option<String>,
    /// Footer tokens in order of appearance.
    pub references: Vec<FooterToken>,
    /// Whether this is a breaking change (`!` or a `BREAKING CHANGE` token).
    pub is_breaking: bool,
    /// Blank lines between the header and the body.
    #[serde(skip)]
    pub body_leading_blanks: usize,
    /// Blank lines between the preceding section and the footer.
    #[serde(skip)]
    pub footer_leading_blanks: usize,
}

impl ParsedMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Self {
        let raw = message.trim();
        let lines: Vec<&str> = raw.lines().collect();
        let header = lines.first().copied().unwrap_or("").to_string();

        let (commit_type, scope, subject, bang) = match HEADER_REGEX.captures(&header) {
            Some(captures) => (
                captures
                    .name("type")
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty()),
                captures.name("scope").map(|m| m.as_str().to_string()),
                captures.name("subject").map(|m| m.as_str().to_string()),
                captures.name("breaking").is_some(),
            ),
            None => {
                tracing::debug!("Header does not match type(scope): subject: {:?}", header);
                (None, None, None, false)
            }
        };

        let rest: &[&str] = lines.get(1..).unwrap_or(&[]);
        let (body_lines, footer_lines) = match footer_start(rest) {
            Some(i) => rest.split_at(i),
            None => (rest, &[][..]),
        };

        let body_leading_blanks = body_lines.iter().take_while(|l| is_blank(l)).count();
        let body = join_trimmed(body_lines);

        let footer_leading_blanks = body_lines.iter().rev().take_while(|l| is_blank(l)).count();
        let footer = join_trimmed(footer_lines);
        let references = parse_footer_tokens(footer_lines);

        let is_breaking = bang
            || references
                .iter()
                .any(|t| t.key == "BREAKING CHANGE" || t.key == "BREAKING-CHANGE");

        Self {
            raw: raw.to_string(),
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            references,
            is_breaking,
            body_leading_blanks,
            footer_leading_blanks,
        }
    }

    /// Header length in characters.
    pub fn header_len(&self) -> usize {
        self.header.chars().count()
    }

    /// Whether the header has the `type[(scope)]: subject` shape.
    pub fn is_conventional(&self) -> bool {
        self.commit_type.is_some() && self.subject.is_some()
    }
}

/// Remove comment lines and anything below a scissors line, as git does
/// before recording the message.
pub fn strip_comments(message: &str, comment_char: Option<char>) -> String {
    let Some(comment_char) = comment_char else {
        return message.to_string();
    };

    let mut kept = Vec::new();
    for line in message.lines() {
        if line.starts_with(comment_char) {
            if line.contains(SCISSORS) {
                break;
            }
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Join lines, dropping blank lines at both ends.
fn join_trimmed(lines: &[&str]) -> Option<String> {
    let start = lines.iter().position(|l| !is_blank(l))?;
    let end = lines.iter().rposition(|l| !is_blank(l))?;
    Some(lines[start..=end].join("\n"))
}

fn is_token(line: &str) -> bool {
    FOOTER_TOKEN_REGEX.is_match(line)
}

/// Index of the first footer line in the lines following the header.
///
/// The footer is the trailing run of paragraphs that each open with a
/// token line. Failing that, a token line inside the last paragraph starts
/// the footer when only token or indented continuation lines follow it.
fn footer_start(rest: &[&str]) -> Option<usize> {
    let mut paragraphs = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        if is_blank(rest[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < rest.len() && !is_blank(rest[i]) {
            i += 1;
        }
        paragraphs.push((start, i));
    }

    let trailing = paragraphs
        .iter()
        .rev()
        .take_while(|&&(first, _)| is_token(rest[first]))
        .last()
        .map(|&(first, _)| first);
    if trailing.is_some() {
        return trailing;
    }

    let &(first, end) = paragraphs.last()?;
    (first + 1..end).find(|&j| {
        is_token(rest[j])
            && rest[j + 1..end]
                .iter()
                .all(|l| is_token(l) || l.starts_with(char::is_whitespace))
    })
}

fn parse_footer_tokens(lines: &[&str]) -> Vec<FooterToken> {
    let mut tokens: Vec<FooterToken> = Vec::new();

    for line in lines {
        if let Some(captures) = FOOTER_TOKEN_REGEX.captures(line) {
            let token = match (captures.name("key"), captures.name("ref_key")) {
                (Some(key), _) => FooterToken {
                    key: key.as_str().to_string(),
                    value: captures
                        .name("value")
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                },
                (None, Some(key)) => FooterToken {
                    key: key.as_str().to_string(),
                    value: captures
                        .name("ref_id")
                        .map(|m| format!("#{}", m.as_str()))
                        .unwrap_or_default(),
                },
                (None, None) => continue,
            };
            tokens.push(token);
        } else if let Some(last) = tokens.last_mut() {
            // Continuation of a multi-line value.
            last.value.push('\n');
            last.value.push_str(line);
        }
    }

    for token in &mut tokens {
        let trimmed = token.value.trim_end().len();
        token.value.truncate(trimmed);
    }

    tokens
}
