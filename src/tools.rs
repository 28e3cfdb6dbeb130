use async_trait::async_trait;

use crate::{commands::Verb, webhooks::PullRequestUrl};

mod agent;
pub use agent::AgentFactory;

/// What a tool runs. The question is the only argument an operation takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Review,
    Describe,
    Improve,
    Ask { question: String },
}

impl Operation {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Review => Verb::Review,
            Self::Describe => Verb::Describe,
            Self::Improve => Verb::Improve,
            Self::Ask { .. } => Verb::Ask,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub pr: PullRequestUrl,
    pub operation: Operation,
}

/// One AI-assisted operation on a pull request, run once.
#[async_trait]
pub trait PrTool: Send + Sync {
    async fn execute(&self) -> anyhow::Result<()>;
}

pub trait ToolFactory {
    fn build(&self, invocation: Invocation) -> Box<dyn PrTool>;
}
