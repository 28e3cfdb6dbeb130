use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::webhooks::{PullRequestUrl, WebhookEvent};

pub mod events;
use events::{IssueCommentEvent, PullRequestEvent};

const REVIEW_ACTIONS: &[&str] = &["opened", "reopened"];
const COMMENT_ACTIONS: &[&str] = &["created", "edited"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitHubEventType {
    PullRequest,
    IssueComment,
    #[serde(other)]
    Other,
}

impl GitHubEventType {
    pub fn from_name(name: &str) -> Self {
        serde_json::from_value(Value::String(name.to_owned())).unwrap_or(Self::Other)
    }
}

/// What the runner should do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A pull request was (re)opened and should be reviewed.
    ReviewTrigger(PullRequestUrl),
    /// A comment was posted on a pull request and may contain a command.
    CommentCommand { pr: PullRequestUrl, body: String },
    Ignore(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnsupportedEvent(String),
    UnsupportedAction {
        event: String,
        action: Option<String>,
    },
    UnexpectedPayload(String),
    MissingPullRequestUrl,
    EmptyComment,
    NotAPullRequest,
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedEvent(name) => write!(f, "event `{}` is not handled", name),
            Self::UnsupportedAction { event, action } => match action {
                Some(action) => write!(f, "action `{}` of `{}` is not handled", action, event),
                None => write!(f, "`{}` event has no action", event),
            },
            Self::UnexpectedPayload(event) => {
                write!(f, "`{}` payload doesn't have the expected shape", event)
            }
            Self::MissingPullRequestUrl => write!(f, "payload has no pull request url"),
            Self::EmptyComment => write!(f, "comment body is empty"),
            Self::NotAPullRequest => write!(f, "comment wasn't posted on a pull request"),
        }
    }
}

/// Decides which path an event takes. Unknown events and incomplete payloads are ignored, never
/// rejected.
pub fn classify(event: &WebhookEvent) -> Classification {
    trace!("classifying `{}` event", event.name);
    let action = event.action.as_deref();

    let classification = match event.kind() {
        GitHubEventType::PullRequest if is_one_of(action, REVIEW_ACTIONS) => {
            classify_pull_request(event)
        }
        GitHubEventType::IssueComment if is_one_of(action, COMMENT_ACTIONS) => {
            classify_issue_comment(event)
        }
        GitHubEventType::PullRequest | GitHubEventType::IssueComment => {
            Classification::Ignore(IgnoreReason::UnsupportedAction {
                event: event.name.clone(),
                action: event.action.clone(),
            })
        }
        GitHubEventType::Other => {
            Classification::Ignore(IgnoreReason::UnsupportedEvent(event.name.clone()))
        }
    };

    debug!("classified `{}` event as {:?}", event.name, classification);
    classification
}

fn is_one_of(action: Option<&str>, accepted: &[&str]) -> bool {
    action.map_or(false, |action| accepted.contains(&action))
}

fn classify_pull_request(event: &WebhookEvent) -> Classification {
    let payload = match PullRequestEvent::deserialize(&event.payload) {
        Ok(payload) => payload,
        Err(e) => {
            trace!("couldn't read pull_request payload: {}", e);
            return Classification::Ignore(IgnoreReason::UnexpectedPayload(event.name.clone()));
        }
    };

    match payload.url().and_then(PullRequestUrl::new) {
        Some(pr) => Classification::ReviewTrigger(pr),
        None => Classification::Ignore(IgnoreReason::MissingPullRequestUrl),
    }
}

fn classify_issue_comment(event: &WebhookEvent) -> Classification {
    let payload = match IssueCommentEvent::deserialize(&event.payload) {
        Ok(payload) => payload,
        Err(e) => {
            trace!("couldn't read issue_comment payload: {}", e);
            return Classification::Ignore(IgnoreReason::UnexpectedPayload(event.name.clone()));
        }
    };

    let body = match payload.body() {
        Some(body) => body.to_owned(),
        None => return Classification::Ignore(IgnoreReason::EmptyComment),
    };

    match payload.pull_request_url().and_then(PullRequestUrl::new) {
        Some(pr) => Classification::CommentCommand { pr, body },
        None => Classification::Ignore(IgnoreReason::NotAPullRequest),
    }
}
