use serde::Deserialize;

mod issue_comment;
mod pull_request;

pub use issue_comment::*;
pub use pull_request::*;

/// Only the fields the runner routes on are modelled, and all of them are optional: an Actions
/// payload missing one of them is ignored, not rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PullRequest {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Issue {
    // an issue can be a PR, in this case the object contains a `pull_request` key with urls to the
    // PR
    pub pull_request: Option<PullRequestLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestLinks {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Comment {
    pub body: Option<String>,
}
