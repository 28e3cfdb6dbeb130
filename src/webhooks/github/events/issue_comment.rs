use serde::Deserialize;

use crate::webhooks::github::events::{Comment, Issue};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IssueCommentEvent {
    pub issue: Issue,
    pub comment: Comment,
}

impl IssueCommentEvent {
    /// URL of the pull request the comment was posted on, `None` for plain issues.
    pub fn pull_request_url(&self) -> Option<&str> {
        self.issue
            .pull_request
            .as_ref()
            .and_then(|links| links.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn body(&self) -> Option<&str> {
        self.comment.body.as_deref().filter(|body| !body.is_empty())
    }
}
