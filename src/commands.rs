//! Slash-commands found in pull request comments.

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Operation requested on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Review,
    Describe,
    Improve,
    Ask,
}

impl Verb {
    /// Name of the operation, as the agent program expects it on its command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Describe => "describe",
            Self::Improve => "improve",
            Self::Ask => "ask",
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    /// The question following `/ask`. Always `None` for other verbs.
    pub argument: Option<String>,
}

impl Command {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            argument: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Recognized(Command),
    /// No known command in the comment. Holds the comment as it was posted.
    Unrecognized(String),
}

/// Synonym groups, in priority order: the first group with a token anywhere in the comment wins.
const COMMANDS: &[(&[&str], Verb)] = &[
    (&["/review", "/review_pr"], Verb::Review),
    (&["/describe", "/describe_pr"], Verb::Describe),
    (&["/improve", "/improve_code"], Verb::Improve),
    (&["/ask", "/ask_question"], Verb::Ask),
];

// `.` stops at the first newline, so the question is the rest of the line holding the command.
static ASK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(/ask|/ask_question)\s*(.*)").expect("ask pattern should compile")
});

/// The form commands are matched against: trimmed and lower-cased.
pub fn normalize(body: &str) -> String {
    body.trim().to_lowercase()
}

pub fn extract(body: &str) -> Extraction {
    let normalized = normalize(body);

    let verb = COMMANDS.iter().find_map(|(tokens, verb)| {
        tokens
            .iter()
            .any(|token| normalized.contains(token))
            .then(|| *verb)
    });

    match verb {
        Some(Verb::Ask) => Extraction::Recognized(Command {
            verb: Verb::Ask,
            argument: extract_question(body),
        }),
        Some(verb) => Extraction::Recognized(Command::new(verb)),
        None => Extraction::Unrecognized(body.to_owned()),
    }
}

/// Everything after the first ask token of the original comment, untrimmed.
fn extract_question(body: &str) -> Option<String> {
    let question = ASK_PATTERN
        .captures(body)
        .and_then(|captures| captures.get(2))
        .map(|question| question.as_str().to_owned());

    if question.is_none() {
        trace!("ask token found but pattern didn't match `{}`", body);
    }

    question
}
