use std::fmt::Display;

use serde_json::Value;

pub mod github;
pub use github::{classify, Classification, GitHubEventType, IgnoreReason};

/// A single webhook delivery, as handed to the job by the CI runner.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub name: String,
    pub action: Option<String>,
    pub payload: Value,
}

impl WebhookEvent {
    /// Builds the event from its name and parsed payload, reading the top-level `action` field.
    ///
    /// A non-string `action` is treated as absent.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        let action = payload
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            name: name.into(),
            action,
            payload,
        }
    }

    pub fn kind(&self) -> GitHubEventType {
        GitHubEventType::from_name(&self.name)
    }
}

/// Opaque reference to the pull request an operation targets. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestUrl(String);

impl PullRequestUrl {
    pub fn new(url: &str) -> Option<Self> {
        if url.is_empty() {
            None
        } else {
            Some(Self(url.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PullRequestUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
