use serde::Deserialize;

use crate::webhooks::github::events::PullRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PullRequestEvent {
    pub pull_request: PullRequest,
}

impl PullRequestEvent {
    pub fn url(&self) -> Option<&str> {
        self.pull_request.url.as_deref().filter(|url| !url.is_empty())
    }
}
